use super::*;

use rand::{RngCore, SeedableRng};

#[test]
fn test_selftest() {
    assert!(selftest());
}

#[test]
fn test_blobbits_is_13() {
    assert_eq!(blobbits(), 13);
}

#[test]
fn test_no_split_on_empty_buffer() {
    assert_eq!(splitbuf(&[]), (NO_SPLIT, -1));
}

#[test]
fn test_split_is_deterministic() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut buf = vec![0u8; 256 * 1024];
    rng.fill_bytes(&mut buf);

    assert_eq!(splitbuf(&buf), splitbuf(&buf));
}

#[test]
fn test_split_bits_at_least_blobbits() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let mut buf = vec![0u8; 256 * 1024];
    rng.fill_bytes(&mut buf);

    let (offset, bits) = splitbuf(&buf);
    if offset != NO_SPLIT {
        assert!(bits >= blobbits() as i32);
    }
}

#[test]
fn test_split_stable_under_prefix_insertion() {
    // Find every split point in a buffer, then re-find split points in the
    // same buffer with a few bytes inserted well after the window; the
    // remainder of the chunk boundaries (after the inserted region) must
    // still land at the same relative offsets past the insertion.
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut buf = vec![0u8; 512 * 1024];
    rng.fill_bytes(&mut buf);

    let mut first_splits = vec![];
    let mut rest = &buf[..];
    let mut base = 0usize;
    loop {
        let (ofs, _bits) = splitbuf(rest);
        if ofs == NO_SPLIT {
            break;
        }
        first_splits.push(base + ofs);
        base += ofs;
        rest = &buf[base..];
    }
    assert!(!first_splits.is_empty());

    // Insert a small patch well past the first window's worth of bytes so
    // the earliest boundary must repeat identically.
    let insert_at = first_splits[0] + 1024;
    let mut patched = buf.clone();
    patched.splice(insert_at..insert_at, [0xAAu8; 5].iter().cloned());

    let (ofs, _) = splitbuf(&patched);
    assert_eq!(ofs, first_splits[0]);
}
