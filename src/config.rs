//! Tunable defaults for the kernel's primitives.
//!
//! None of these values change the on-disk formats described by the
//! [`bloom`][crate::bloom], [`splitter`][crate::splitter] or
//! [`index`][crate::index] modules; they only pick defaults for callers
//! that don't want to choose `k`, `nbits` or the chunking threshold
//! themselves. Persisted the same way the rest of this kernel's host
//! application persists its settings: a flat TOML document.

use serde::Deserialize;

use std::path;

use crate::{bloom, splitter, Result};

/// Default Bloom filter fan-out, chosen for the 5-slice addressing scheme.
pub const DEFAULT_NBITS: u32 = 20;

/// Default number of independent probes per fingerprint.
pub const DEFAULT_K: u8 = 5;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rolling-checksum zero-bit threshold, in bits. Overrides
    /// [`splitter::blobbits`] for splitters built from this config.
    pub blobbits: u32,
    /// Number of bloom probes per fingerprint, one of 4 or 5.
    pub bloom_k: u8,
    /// log2 of the addressable portion of a bloom filter.
    pub bloom_nbits: u32,
    /// Fan-out width, in bits, for combined indices built with this config.
    pub merge_fanout_bits: u32,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            blobbits: splitter::blobbits(),
            bloom_k: DEFAULT_K,
            bloom_nbits: DEFAULT_NBITS,
            merge_fanout_bits: 16,
        }
    }
}

impl Config {
    /// Validate that `bloom_k`/`bloom_nbits` are a legal combination for
    /// [`bloom::bloom_add`].
    pub fn validate(&self) -> Result<()> {
        bloom::validate_params(self.bloom_nbits, self.bloom_k)
    }

    /// Load configuration from a TOML file, falling back to defaults
    /// for any field the file omits.
    pub fn load<P>(loc: P) -> Result<Config>
    where
        P: AsRef<path::Path>,
    {
        use std::str::from_utf8;

        let ploc: &path::Path = loc.as_ref();
        let data = err_at!(IOError, std::fs::read(ploc))?;
        let s = err_at!(InvalidFile, from_utf8(&data), "not utf8 for {:?}", ploc)?;
        let config: Config = err_at!(InvalidFile, toml::from_str(s), "file:{:?}", ploc)?;
        config.validate()?;
        Ok(config)
    }
}
