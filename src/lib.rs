#![crate_name = "smbdir"]
#![crate_type = "lib"]

//! # smbdir
//!
//! smbdir is an SMB directory enumeration layer: it opens a client session, opens
//! directory streams against it and decodes their packed records into directory entries.
//! The SMB protocol itself is provided by a native backend, such as libsmbclient through
//! [pavao](https://github.com/veeso/pavao).
//!
//! ## Get started
//!
//! ```toml
//! smbdir = { version = "^0.1", features = ["pavao"] }
//! ```
//!
//! these features are supported:
//!
//! - `pavao`: enable the libsmbclient backend (UNIX only).
//! - `no-log`: disable logging. By default, this library will log via the `log` crate.
//!
//! ### List a directory
//!
//! ```rust,ignore
//! use smbdir::{Context, PavaoBackend, SmbCredentials, SmbOptions};
//!
//! let context = Context::open(
//!     PavaoBackend::new(),
//!     SmbCredentials::default()
//!         .server("smb://localhost:3445")
//!         .share("/temp")
//!         .username("test")
//!         .password("test")
//!         .workgroup("pavao"),
//!     SmbOptions::default().case_sensitive(true),
//! )
//! .unwrap();
//!
//! // open a directory relative to the share and drain it
//! let mut dir = context.open_dir("/cargo").unwrap();
//! for entry in dir.read_entries().unwrap() {
//!     println!("{:?} {}", entry.get_type(), entry.name());
//! }
//! dir.close();
//! context.close();
//! ```
//!
//! ### Custom backends
//!
//! Any native client can be plugged in by implementing [`SmbBackend`]: the backend opens
//! cursors and fills a scratch buffer with packed records (see [`dirent`]), while this
//! crate owns the handle lifecycle, error translation and record decoding.
//!

#![doc(html_playground_url = "https://play.rust-lang.org")]

// -- crates
#[macro_use]
extern crate log;

pub mod backend;
mod client;
pub mod dirent;
mod error;

#[cfg(all(target_family = "unix", feature = "pavao"))]
pub use backend::PavaoBackend;
pub use backend::SmbBackend;
pub use client::{Context, DirHandle, SmbCredentials, SmbOptions, DEFAULT_DIRENT_BUFFER_SIZE};
pub use dirent::{DirEntry, DirEntryType};
pub use error::{Errno, SmbError, SmbResult};
pub use utils::remote::dirent_to_file;

// -- utils
pub(crate) mod utils;
// -- mock
#[cfg(test)]
pub(crate) mod mock;
