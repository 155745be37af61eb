//! A read-only cursor over one sorted on-disk fingerprint index, as
//! consumed by the k-way [merger][crate::index::merge].

use crate::{Error, Result};

/// One input to [`merge_into`][crate::index::merge_into::merge_into]: a
/// byte-mapped index region plus the offsets describing where its
/// fingerprint array and (optional) name array live inside it.
#[derive(Clone, Copy)]
pub struct InputIndex<'a> {
    /// The full mapped region backing this index (used only for bounds
    /// checking; cursors read through `sha_ofs`/`name_ofs` instead).
    pub map: &'a [u8],
    /// Number of fingerprints in this index.
    pub len: usize,
    /// Byte offset into `map` where the sorted fingerprint array starts.
    pub sha_ofs: usize,
    /// Byte offset into `map` where the parallel big-endian `u32` name
    /// array starts, or `None` if this index carries no name array (every
    /// entry's name is then just `name_base`).
    pub name_ofs: Option<usize>,
    /// Added to every raw name value before it is emitted.
    pub name_base: u32,
}

/// Iterator-like cursor over the live (not yet consumed) tail of one
/// [`InputIndex`].
pub struct IndexCursor<'a> {
    map: &'a [u8],
    cur: usize,
    end: usize,
    cur_name: Option<usize>,
    name_base: u32,
}

impl<'a> IndexCursor<'a> {
    pub fn new(input: &InputIndex<'a>) -> Result<IndexCursor<'a>> {
        let sha_end = input
            .sha_ofs
            .checked_add(input.len * 20)
            .ok_or_else(|| overflow_err())?;
        if sha_end > input.map.len() {
            return err_at!(
                InvalidFile,
                msg: "sha array [{}, {}) runs past mapped region of {} bytes",
                input.sha_ofs, sha_end, input.map.len()
            );
        }
        if let Some(name_ofs) = input.name_ofs {
            let name_end = name_ofs
                .checked_add(input.len * 4)
                .ok_or_else(|| overflow_err())?;
            if name_end > input.map.len() {
                return err_at!(
                    InvalidFile,
                    msg: "name array [{}, {}) runs past mapped region of {} bytes",
                    name_ofs, name_end, input.map.len()
                );
            }
        }

        Ok(IndexCursor {
            map: input.map,
            cur: input.sha_ofs,
            end: sha_end,
            cur_name: input.name_ofs,
            name_base: input.name_base,
        })
    }

    /// The 20-byte fingerprint this cursor currently points at.
    ///
    /// Panics if the cursor is [`exhausted`][Self::exhausted]; callers
    /// must check first, the same contract the rest of this module uses.
    pub fn key(&self) -> &'a [u8] {
        let map = self.map;
        &map[self.cur..self.cur + 20]
    }

    /// The name to emit for the current fingerprint: `name_base` if this
    /// index carries no name array, else `name_base + name_array[i]`.
    pub fn name(&self) -> u32 {
        match self.cur_name {
            None => self.name_base,
            Some(ofs) => {
                let mut raw = [0u8; 4];
                raw.copy_from_slice(&self.map[ofs..ofs + 4]);
                self.name_base.wrapping_add(u32::from_be_bytes(raw))
            }
        }
    }

    /// Advance both the fingerprint and name cursors by one entry.
    pub fn advance(&mut self) {
        self.cur += 20;
        if let Some(ofs) = self.cur_name.as_mut() {
            *ofs += 4;
        }
    }

    /// Whether this cursor has no more entries.
    pub fn exhausted(&self) -> bool {
        self.cur >= self.end
    }
}

fn overflow_err() -> Error {
    Error::InvalidFile(format!("{}:{} offset arithmetic overflowed", file!(), line!()))
}

#[cfg(test)]
#[path = "cursor_test.rs"]
mod cursor_test;
