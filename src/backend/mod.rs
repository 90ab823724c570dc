//! # backend
//!
//! Native directory stream API the session layer runs on

use crate::{Errno, SmbCredentials, SmbOptions};

#[cfg(all(target_family = "unix", feature = "pavao"))]
mod smbclient;
#[cfg(all(target_family = "unix", feature = "pavao"))]
pub use smbclient::{PavaoBackend, PavaoCursor};

/// A native SMB client session able to enumerate directories.
///
/// Implementations are not required to be reentrant: the session layer never calls
/// into a backend concurrently.
pub trait SmbBackend {
    /// Native directory cursor
    type Cursor;

    /// Initialize the session with the provided credentials and options
    fn init(&mut self, credentials: &SmbCredentials, options: &SmbOptions) -> Result<(), Errno>;

    /// Open a directory stream on a fully qualified `smb://` uri
    fn open_dir(&mut self, uri: &str) -> Result<Self::Cursor, Errno>;

    /// Fill `buf` with as many packed dirent records as fit.
    ///
    /// Returns the number of bytes filled; `0` means the stream is exhausted.
    /// See [`crate::dirent`] for the record layout.
    fn fill_dirents(&mut self, cursor: &mut Self::Cursor, buf: &mut [u8]) -> Result<usize, Errno>;

    /// Close a directory stream
    fn close_dir(&mut self, cursor: Self::Cursor) -> Result<(), Errno>;

    /// Tear the session down. Called once, after every cursor has been closed
    fn shutdown(&mut self) {}
}
