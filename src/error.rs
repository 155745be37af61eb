use std::{fmt, result};

/// Error variants returned by this crate.
///
/// Every variant carries a formatted `file:line` prefix (added by the
/// [`err_at`] macro) followed by a human readable message.
#[derive(Debug)]
pub enum Error {
    /// Caller supplied a buffer, length or parameter combination that
    /// violates a documented precondition.
    InvalidInput(String),
    /// A mapped index or filter buffer is too short, or an offset inside
    /// it runs past its end.
    InvalidFile(String),
    /// Underlying filesystem operation failed.
    IOError(String),
    /// Condition that should be unreachable given validated inputs.
    Fatal(String),
    /// Facility not available on the host platform.
    NotImplemented(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "InvalidInput: {}", msg),
            Error::InvalidFile(msg) => write!(f, "InvalidFile: {}", msg),
            Error::IOError(msg) => write!(f, "IOError: {}", msg),
            Error::Fatal(msg) => write!(f, "Fatal: {}", msg),
            Error::NotImplemented(msg) => write!(f, "NotImplemented: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Crate-wide `Result` alias.
pub type Result<T> = result::Result<T, Error>;

/// Build an [`Error`] (or convert an [`io::Error`][std::io::Error]-bearing
/// `Result`) tagging it with the call site, the way every fallible
/// operation in this crate reports failure.
///
/// ```text
/// err_at!(InvalidInput, msg: "nbits {} exceeds {} for k={}", nbits, max, k)
/// err_at!(IOError, fs::File::open(path))
/// err_at!(IOError, fs::File::open(path), "opening {:?}", path)
/// ```
#[macro_export]
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err($crate::Error::$v(format!("{} {}", prefix, format!($($arg),+))))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err($crate::Error::$v(format!("{} {}", prefix, err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err($crate::Error::$v(format!("{} {} {}", prefix, format!($($arg),+), err)))
            }
        }
    }};
}
