//! Deterministic pseudo-random data generation for benchmarks: filling a
//! file with reproducible garbage and minting random fingerprints to
//! stand in for content hashes in synthetic indices.
//!
//! Both are seeded explicitly rather than drawing from OS entropy, so a
//! benchmark run is reproducible given its seed.

use std::io::Write;

use rand::{Rng, RngCore, SeedableRng};

use crate::Result;

const BLOCK_BYTES: usize = 1024;

/// Write `len` bytes of seeded pseudo-random data to `out`, in 1 KiB
/// blocks, returning the number of bytes actually written.
///
/// `len` need not be a multiple of 1024; the final partial block is
/// truncated to what's left. If `verbose` is true, progress is logged
/// once per megabyte written.
pub fn write_random<W: Write>(out: &mut W, len: u64, seed: u64, verbose: bool) -> Result<u64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut buf = [0u8; BLOCK_BYTES];
    let mut written = 0u64;
    let mut last_mb_logged = 0u64;

    while written < len {
        rng.fill(&mut buf[..]);

        let remaining = len - written;
        let take = remaining.min(buf.len() as u64) as usize;
        err_at!(IOError, out.write_all(&buf[..take]))?;
        written += take as u64;

        if verbose {
            let mb = written / (1024 * 1024);
            if mb > last_mb_logged {
                log::info!(target: "bench", "wrote {} MiB", mb);
                last_mb_logged = mb;
            }
        }
    }

    Ok(written)
}

/// Generate a fresh 20-byte pseudo-random fingerprint from `rng`.
///
/// Callers that need many fingerprints should build one `rng` (seeded
/// however they like) and call this repeatedly rather than reseeding
/// per call.
pub fn random_sha(rng: &mut impl RngCore) -> [u8; 20] {
    let mut sha = [0u8; 20];
    rng.fill_bytes(&mut sha);
    sha
}
