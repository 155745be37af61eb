//! Sorted fingerprint indices: cursors over individual indices and the
//! k-way merge that combines them.

pub mod cursor;
pub mod merge;

pub use cursor::{IndexCursor, InputIndex};
pub use merge::merge_into;
