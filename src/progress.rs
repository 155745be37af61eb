//! Advisory progress reporting for long-running merges.
//!
//! Mirrors the `istty` flag bup-style tools set up once at process start:
//! a single atomic probe of stderr, overridable from the environment so
//! tests can exercise the progress path without a real terminal attached.

use lazy_static::lazy_static;

/// Set this to force progress output on even when stderr is not a tty,
/// e.g. under a test harness.
pub const FORCE_TTY_ENV: &str = "DEDUP_KERNEL_FORCE_TTY";

lazy_static! {
    static ref IS_TTY: bool = probe_tty();
}

#[cfg(unix)]
fn probe_tty() -> bool {
    let stderr_is_tty = unsafe { libc::isatty(2) } != 0;
    stderr_is_tty || std::env::var_os(FORCE_TTY_ENV).is_some()
}

#[cfg(not(unix))]
fn probe_tty() -> bool {
    std::env::var_os(FORCE_TTY_ENV).is_some()
}

/// Whether advisory progress lines should be emitted. Computed once per
/// process and cached.
pub fn is_tty() -> bool {
    *IS_TTY
}

/// How often (in processed entries) [`crate::index::merge_into`] writes a
/// progress line, lifted from the original tool's fixed interval.
pub const REPORT_INTERVAL: u32 = 102_424;

/// Write a carriage-returned progress line for a merge in flight.
pub fn report_merge(done: u32, total: usize) {
    let pct = if total == 0 {
        100.0
    } else {
        (done as f64) * 100.0 / (total as f64)
    };
    eprint!("midx: writing {:.2}% ({}/{})\r", pct, done, total);
}
