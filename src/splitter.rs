//! Content-defined chunking via a rolling checksum over a sliding window.
//!
//! The checksum is a cyclic-polynomial-style rolling sum: rolling a byte
//! out of the window and a new one in updates the running sum in O(1),
//! so the same content produces the same split points regardless of
//! where it sits in a larger buffer. A split is declared wherever the
//! low [`BLOBBITS`] bits of the running sum are all zero, which (for
//! random input) happens on average every `2^BLOBBITS` bytes.
//!
//! [`splitbuf`] additionally reports how many trailing zero bits were
//! actually present at the split point (always `>= BLOBBITS`); callers
//! use that to grow a tree of chunks by recursively re-splitting wherever
//! the reported bit count is large, without a second pass over the data.

const WINDOWBITS: u32 = 6;
const WINDOWSIZE: usize = 1 << WINDOWBITS;
const CHAR_OFFSET: u32 = 31;

/// Zero-bit threshold below which a split point is declared. Expected
/// chunk size is roughly `2^BLOBBITS` bytes.
const BLOBBITS: u32 = 13;
const BLOBSIZE: u32 = 1 << BLOBBITS;

/// Sentinel offset returned by [`splitbuf`] when no split point was found
/// in the buffer.
pub const NO_SPLIT: usize = 0;

/// Return the zero-bit threshold used to declare a split point.
pub fn blobbits() -> u32 {
    BLOBBITS
}

struct Rollsum {
    s1: u32,
    s2: u32,
    window: [u8; WINDOWSIZE],
    wofs: usize,
}

impl Rollsum {
    fn new() -> Rollsum {
        Rollsum {
            s1: (WINDOWSIZE as u32) * CHAR_OFFSET,
            s2: (WINDOWSIZE as u32) * ((WINDOWSIZE as u32) - 1) * CHAR_OFFSET,
            window: [0u8; WINDOWSIZE],
            wofs: 0,
        }
    }

    fn add(&mut self, drop: u8, add: u8) {
        self.s1 = self.s1.wrapping_add(add as u32).wrapping_sub(drop as u32);
        self.s2 = self
            .s2
            .wrapping_add(self.s1)
            .wrapping_sub((WINDOWSIZE as u32) * (drop as u32 + CHAR_OFFSET));
    }

    fn roll(&mut self, ch: u8) {
        let drop = self.window[self.wofs];
        self.add(drop, ch);
        self.window[self.wofs] = ch;
        self.wofs = (self.wofs + 1) % WINDOWSIZE;
    }

    fn digest(&self) -> u32 {
        (self.s1 << 16) | (self.s2 & 0xffff)
    }
}

/// Find the first content-defined split point in `buf`.
///
/// Returns `(offset, bits)`. `offset` is the one-past-the-end position of
/// the chunk (so `buf[..offset]` is the chunk), or [`NO_SPLIT`] if no
/// boundary was found anywhere in `buf`; in that case `bits` is `-1`.
/// When a boundary is found, `bits` is the total count of trailing zero
/// bits seen in the rolling sum at that position, always `>= blobbits()`.
pub fn splitbuf(buf: &[u8]) -> (usize, i32) {
    let mut sum = Rollsum::new();
    for (i, &byte) in buf.iter().enumerate() {
        sum.roll(byte);
        if sum.s2 & (BLOBSIZE - 1) == BLOBSIZE - 1 {
            let mut bits = BLOBBITS as i32;
            let mut rsum = sum.digest() >> BLOBBITS;
            loop {
                rsum >>= 1;
                if rsum & 1 == 0 {
                    break;
                }
                bits += 1;
            }
            return (i + 1, bits);
        }
    }
    (NO_SPLIT, -1)
}

/// Round-trip self-check of the rolling checksum.
///
/// Primes the window with one full cycle of a deterministic byte
/// sequence and takes its digest, then rolls the identical cycle through
/// again. Because the window holds exactly [`WINDOWSIZE`] bytes, every
/// byte "rolled in" during the second pass evicts ("rolls out") the same
/// value it overwrote in the first pass, so the digest must return to
/// where it started. Returns `true` on success.
pub fn selftest() -> bool {
    let mut sum = Rollsum::new();
    for i in 0..WINDOWSIZE {
        sum.roll(i as u8);
    }
    let first = sum.digest();
    for i in 0..WINDOWSIZE {
        sum.roll(i as u8);
    }
    let second = sum.digest();
    first == second
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod splitter_test;
