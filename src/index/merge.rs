//! K-way merge of sorted fingerprint indices into one combined index with
//! a fan-out prefix table.
//!
//! The combined index, written into the caller's `out` buffer starting
//! at byte offset 12 (the first 12 bytes are a caller-managed header):
//!
//! ```text
//! fan_out[0..2^bits]   each 4 bytes big-endian
//! sha[0..N]            each 20 bytes, strictly ascending
//! name[0..N]           each 4 bytes big-endian
//! ```
//!
//! where `N` is the deduplicated fingerprint count this function returns.

use crate::{
    bitops,
    index::cursor::{IndexCursor, InputIndex},
    progress, Error, Result,
};

const HEADER_LEN: usize = 12;

/// Merge `inputs` into `out`, building a `2^bits`-entry fan-out table
/// over the deduplicated union of their fingerprints.
///
/// `total` is an upper bound on the number of distinct fingerprints
/// (typically the sum of the input lengths); `out` must be at least
/// `12 + 4*2^bits + 24*total` bytes. Returns the number of distinct
/// fingerprints actually written — the caller's output buffer beyond
/// that point is unused but still touched, and on error the output
/// region must be treated as indeterminate since fan-out entries are
/// written incrementally as the merge progresses.
pub fn merge_into(out: &mut [u8], bits: u32, total: usize, inputs: &[InputIndex]) -> Result<usize> {
    let fanout_len = 1usize << bits;
    let fanout_bytes = 4 * fanout_len;
    let sha_start = HEADER_LEN + fanout_bytes;
    let name_start = sha_start + 20 * total;
    let needed = name_start + 4 * total;
    if out.len() < needed {
        return err_at!(
            InvalidInput,
            msg: "output buffer too short: {} < {}", out.len(), needed
        );
    }

    // Build one cursor per input, drop exhausted ones, then establish the
    // descending-by-current-key invariant explicitly: the original tool
    // this is modeled on relied on the caller to hand indices in an order
    // that happened to already satisfy it, which is fragile, so this
    // merge derives the invariant itself instead of assuming it. Cursors
    // are built in reverse of `inputs` order so that, for keys tied
    // across inputs, a stable sort settles the earliest-listed input at
    // the tail — the position processed first — matching the documented
    // first-seen-wins rule for cross-input duplicates.
    let mut cursors: Vec<IndexCursor> = inputs
        .iter()
        .rev()
        .map(IndexCursor::new)
        .collect::<Result<Vec<_>>>()?;
    cursors.retain(|c| !c.exhausted());
    cursors.sort_by(|a, b| b.key().cmp(a.key()));

    let tty = progress::is_tty();
    let mut running: u32 = 0;
    let mut dedup: usize = 0;
    let mut prefix: u32 = 0;
    let mut last: Option<[u8; 20]> = None;

    while let Some(last_i) = cursors.len().checked_sub(1) {
        if tty && running % progress::REPORT_INTERVAL == 0 {
            progress::report_merge(running, total);
        }

        let mut key = [0u8; 20];
        key.copy_from_slice(cursors[last_i].key());

        // bits == 0 means a single fan-out bucket covering every key;
        // extract_bits rejects nbits == 0, so there is nothing to extract.
        let new_prefix = if bits == 0 {
            0
        } else {
            bitops::extract_bits(&key, bits)?
        };
        while prefix < new_prefix {
            write_be_u32(out, HEADER_LEN + 4 * (prefix as usize), dedup as u32);
            prefix += 1;
        }

        if last != Some(key) {
            out[sha_start + dedup * 20..sha_start + dedup * 20 + 20].copy_from_slice(&key);
            let name = cursors[last_i].name();
            write_be_u32(out, name_start + dedup * 4, name);
            last = Some(key);
            dedup += 1;
        }

        cursors[last_i].advance();
        if cursors[last_i].exhausted() {
            cursors.pop();
        } else {
            reinsert_tail(&mut cursors);
        }

        running += 1;
    }

    for p in (prefix as usize)..fanout_len {
        write_be_u32(out, HEADER_LEN + 4 * p, dedup as u32);
    }

    Ok(dedup)
}

// Pop the tail cursor (the one just advanced) and binary-search it back
// into its correct position among the remaining, still-descending
// cursors. Equal keys are placed adjacent to one another; which side is
// arbitrary since duplicates are suppressed on emission regardless of
// tie-break order.
fn reinsert_tail(cursors: &mut Vec<IndexCursor>) {
    let moved = cursors.pop().expect("tail cursor must exist");
    let key = {
        let mut k = [0u8; 20];
        k.copy_from_slice(moved.key());
        k
    };
    let pos = cursors.partition_point(|c| c.key() > &key[..]);
    cursors.insert(pos, moved);
}

fn write_be_u32(out: &mut [u8], at: usize, value: u32) {
    out[at..at + 4].copy_from_slice(&value.to_be_bytes());
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod merge_test;
