//! # client
//!
//! Smb session and directory handles

mod config;
mod context;
mod dir;

pub use config::{SmbCredentials, SmbOptions, DEFAULT_DIRENT_BUFFER_SIZE};
pub use context::Context;
pub use dir::DirHandle;
