//! # dir
//!
//! Directory handles

use std::io;

use super::Context;
use crate::backend::SmbBackend;
use crate::dirent::Records;
use crate::utils::uri as uri_utils;
use crate::{DirEntry, SmbError, SmbResult};

/// An open directory stream.
///
/// The handle keeps its [`Context`] alive and is closed on drop.
pub struct DirHandle<B: SmbBackend> {
    context: Context<B>,
    cursor: Option<B::Cursor>,
    uri: String,
    buffer: Vec<u8>,
}

impl<B: SmbBackend> DirHandle<B> {
    /// Open the directory at `uri`.
    ///
    /// `uri` is either a fully qualified `smb://` uri or a path relative to the
    /// context share.
    pub fn open<S: AsRef<str>>(context: &Context<B>, uri: S) -> SmbResult<Self> {
        let uri = uri.as_ref();
        if uri.is_empty() {
            return Err(SmbError::Configuration(String::from("empty uri")));
        }
        let uri = uri_utils::resolve(context.credentials(), uri);
        trace!("opening directory {}", uri);
        let cursor = context.open_cursor(&uri).map_err(|e| {
            error!("failed to open directory {}: {}", uri, e);
            e
        })?;
        debug!("opened directory {}", uri);
        Ok(Self {
            context: context.clone(),
            cursor: Some(cursor),
            buffer: vec![0; context.options().dirent_buffer_size],
            uri,
        })
    }

    /// Resolved uri of the directory
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn is_open(&self) -> bool {
        self.cursor.is_some()
    }

    /// Read every entry left in the stream.
    ///
    /// Entries come in the order the server returns them. Returns an empty vector once
    /// the stream is exhausted. On error nothing read by this call is returned.
    pub fn read_entries(&mut self) -> SmbResult<Vec<DirEntry>> {
        let cursor = self.cursor.as_mut().ok_or_else(|| {
            SmbError::Io(io::Error::from_raw_os_error(libc::EBADF))
        })?;
        let mut entries = Vec::new();
        loop {
            let filled = self
                .context
                .fill_dirents(cursor, &mut self.buffer)
                .map_err(|e| {
                    error!("failed to read directory {}: {}", self.uri, e);
                    e
                })?;
            if filled == 0 {
                break;
            }
            if filled > self.buffer.len() {
                error!(
                    "directory {} filled {} bytes into a {} bytes buffer",
                    self.uri,
                    filled,
                    self.buffer.len()
                );
                return Err(SmbError::invalid_data(format!(
                    "filled {filled} bytes into a {} bytes buffer",
                    self.buffer.len()
                )));
            }
            trace!("read {} bytes of dirents from {}", filled, self.uri);
            for entry in Records::new(&self.buffer[..filled]) {
                entries.push(entry?);
            }
        }
        debug!("read {} entries from {}", entries.len(), self.uri);
        Ok(entries)
    }

    /// Close the directory. Closing an already closed handle does nothing
    pub fn close(&mut self) {
        if let Some(cursor) = self.cursor.take() {
            debug!("closing directory {}", self.uri);
            self.context.close_cursor(cursor);
        }
    }
}

impl<B: SmbBackend> Drop for DirHandle<B> {
    fn drop(&mut self) {
        self.close();
    }
}
