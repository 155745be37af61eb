//! Filesystem hints for bulk sequential scans: opening source files
//! without disturbing atime, and telling the kernel to drop cached
//! pages once a region has been consumed.

use std::fs::{self, File};

use crate::Result;

/// Open `path` for reading, preferring `O_NOATIME` where the platform
/// supports it so a backup scan doesn't dirty every inode it touches.
///
/// Older Linux kernels reject `O_NOATIME` with `EPERM` when the caller
/// doesn't own the file; this falls back to a plain open in that case,
/// matching the permissive behaviour callers actually want.
#[cfg(unix)]
pub fn open_noatime(path: &str) -> Result<File> {
    use std::io;
    use std::os::unix::fs::OpenOptionsExt;

    let noatime = fs::OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NOATIME)
        .open(path);

    match noatime {
        Ok(f) => Ok(f),
        Err(e) if e.raw_os_error() == Some(libc::EPERM) => fs::OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|e| err_at_io(path, e)),
        Err(e) => Err(err_at_io(path, e)),
    }
}

#[cfg(not(unix))]
pub fn open_noatime(path: &str) -> Result<File> {
    fs::OpenOptions::new()
        .read(true)
        .open(path)
        .map_err(|e| err_at_io(path, e))
}

fn err_at_io(path: &str, e: std::io::Error) -> crate::Error {
    crate::Error::IOError(format!(
        "{}:{} opening {:?}: {}",
        file!(),
        line!(),
        path,
        e
    ))
}

/// Tell the kernel it can drop cached pages for `file` in the byte
/// range `[0, ofs)`. Best-effort: a scan that has already moved past
/// this offset doesn't need those pages re-read, so any failure here
/// is not propagated, only logged.
#[cfg(unix)]
pub fn fadvise_done(file: &File, ofs: u64) {
    use std::os::unix::io::AsRawFd;

    let ret = unsafe { libc::posix_fadvise(file.as_raw_fd(), 0, ofs as libc::off_t, libc::POSIX_FADV_DONTNEED) };
    if ret != 0 {
        log::debug!(target: "fshints", "posix_fadvise(0, {}) failed: errno {}", ofs, ret);
    }
}

#[cfg(not(unix))]
pub fn fadvise_done(_file: &File, _ofs: u64) {}

#[cfg(test)]
mod fshints_test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_noatime_reads_existing_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("dedup-kernel-fshints-test-{}", std::process::id()));
        {
            let mut f = fs::File::create(&path).unwrap();
            f.write_all(b"hello").unwrap();
        }

        let f = open_noatime(path.to_str().unwrap()).unwrap();
        use std::io::Read;
        let mut reader = f;
        let mut buf = String::new();
        reader.read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "hello");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_open_noatime_missing_file_errors() {
        assert!(open_noatime("/nonexistent/dedup-kernel/path").is_err());
    }

    #[test]
    fn test_fadvise_done_does_not_panic() {
        let mut path = std::env::temp_dir();
        path.push(format!("dedup-kernel-fadvise-test-{}", std::process::id()));
        let f = fs::File::create(&path).unwrap();
        fadvise_done(&f, 0);
        let _ = fs::remove_file(&path);
    }
}
