//! # error
//!
//! Error types returned by the session layer

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type returned by smbdir operations
pub type SmbResult<T> = Result<T, SmbError>;

/// Error returned by smbdir operations
#[derive(Debug, Error)]
pub enum SmbError {
    /// The session could not be initialized or is no longer usable
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("no such file or directory: {0}")]
    NotFound(String),
    #[error("out of memory")]
    OutOfMemory,
    /// Any other failure; carries the raw os error when the backend reported one
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SmbError {
    /// Translate the errno reported by a failed `open_dir` call
    pub(crate) fn from_open_errno(errno: Errno, uri: &str) -> Self {
        match errno.0 {
            libc::EACCES => Self::PermissionDenied(format!("{uri}: Permission denied")),
            libc::EPERM => Self::PermissionDenied(format!("{uri}: Operation not permitted")),
            libc::ENOENT => Self::NotFound(uri.to_string()),
            libc::ENOMEM => Self::OutOfMemory,
            _ => Self::Io(errno.into()),
        }
    }

    pub(crate) fn invalid_data<S: Into<String>>(msg: S) -> Self {
        Self::Io(io::Error::new(io::ErrorKind::InvalidData, msg.into()))
    }

    /// Raw os error carried by an `Io` error, if any
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Io(e) => e.raw_os_error(),
            _ => None,
        }
    }
}

/// Raw error number reported by a native backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Errno(pub i32);

impl Errno {
    /// Read the calling thread's last os error, falling back to `EIO` when unset
    pub fn last() -> Self {
        match io::Error::last_os_error().raw_os_error() {
            Some(0) | None => Self(libc::EIO),
            Some(code) => Self(code),
        }
    }
}

impl From<Errno> for io::Error {
    fn from(errno: Errno) -> Self {
        io::Error::from_raw_os_error(errno.0)
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (os error {})", io::Error::from(*self).kind(), self.0)
    }
}
