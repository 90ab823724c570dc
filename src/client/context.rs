//! # context
//!
//! Client session shared by every directory handle opened from it

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{DirHandle, SmbCredentials, SmbOptions};
use crate::backend::SmbBackend;
use crate::{DirEntry, SmbError, SmbResult};

/// A configured SMB client session.
///
/// `Context` is a cheap handle: clones share the same session. The session is torn
/// down after [`Context::close`] once no [`DirHandle`] opened from it is left open,
/// or when the last clone and the last handle are dropped.
pub struct Context<B: SmbBackend> {
    inner: Arc<ContextInner<B>>,
}

struct ContextInner<B: SmbBackend> {
    credentials: SmbCredentials,
    options: SmbOptions,
    session: Mutex<Session<B>>,
}

struct Session<B: SmbBackend> {
    backend: Option<B>,
    /// Open handles
    dependents: usize,
    closing: bool,
}

impl<B: SmbBackend> Session<B> {
    fn retain(&mut self) {
        self.dependents += 1;
    }

    /// Returns whether the session must be torn down
    fn release(&mut self) -> bool {
        self.dependents = self.dependents.saturating_sub(1);
        self.closing && self.dependents == 0
    }

    fn teardown(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            debug!("shutting down smb session");
            backend.shutdown();
        }
    }
}

impl<B: SmbBackend> Context<B> {
    /// Open a new session on `backend`.
    /// Fails with `SmbError::Configuration` if the configuration is invalid or the
    /// backend session can't be initialized.
    pub fn open(
        mut backend: B,
        credentials: SmbCredentials,
        options: SmbOptions,
    ) -> SmbResult<Self> {
        credentials.validate()?;
        options.validate()?;
        debug!(
            "initializing smb session on {} (share: '{}')",
            credentials.server, credentials.share
        );
        backend.init(&credentials, &options).map_err(|errno| {
            error!("failed to initialize smb session: {}", errno);
            SmbError::Configuration(format!("could not initialize smb session: {errno}"))
        })?;
        Ok(Self {
            inner: Arc::new(ContextInner {
                credentials,
                options,
                session: Mutex::new(Session {
                    backend: Some(backend),
                    dependents: 0,
                    closing: false,
                }),
            }),
        })
    }

    pub fn credentials(&self) -> &SmbCredentials {
        &self.inner.credentials
    }

    pub fn options(&self) -> &SmbOptions {
        &self.inner.options
    }

    /// Number of directory handles currently open against this session
    pub fn open_handles(&self) -> usize {
        self.session().dependents
    }

    /// Whether `close` has been requested or the session is already torn down
    pub fn is_closed(&self) -> bool {
        let session = self.session();
        session.closing || session.backend.is_none()
    }

    /// Request the session teardown. Never fails.
    ///
    /// The session is shut down immediately if no handle is open, otherwise when the
    /// last open handle is closed. No new handle can be opened afterwards.
    pub fn close(&self) {
        let mut session = self.session();
        session.closing = true;
        if session.dependents == 0 {
            session.teardown();
        } else {
            debug!(
                "smb session close deferred: {} handles still open",
                session.dependents
            );
        }
    }

    /// Open a directory handle on `uri`
    pub fn open_dir<S: AsRef<str>>(&self, uri: S) -> SmbResult<DirHandle<B>> {
        DirHandle::open(self, uri)
    }

    /// Read every entry at `uri`; the directory is closed before returning
    pub fn list_dir<S: AsRef<str>>(&self, uri: S) -> SmbResult<Vec<DirEntry>> {
        let mut dir = self.open_dir(uri)?;
        let entries = dir.read_entries();
        dir.close();
        entries
    }

    // -- crate

    /// Open a native cursor on `uri` and retain the session on success
    pub(crate) fn open_cursor(&self, uri: &str) -> SmbResult<B::Cursor> {
        let mut session = self.session();
        if session.closing {
            return Err(SmbError::Configuration(String::from(
                "smb session has been closed",
            )));
        }
        let backend = session.backend.as_mut().ok_or_else(|| {
            SmbError::Configuration(String::from("smb session has been torn down"))
        })?;
        let cursor = backend
            .open_dir(uri)
            .map_err(|errno| SmbError::from_open_errno(errno, uri))?;
        session.retain();
        Ok(cursor)
    }

    pub(crate) fn fill_dirents(&self, cursor: &mut B::Cursor, buf: &mut [u8]) -> SmbResult<usize> {
        let mut session = self.session();
        let backend = session.backend.as_mut().ok_or_else(|| {
            SmbError::Configuration(String::from("smb session has been torn down"))
        })?;
        backend
            .fill_dirents(cursor, buf)
            .map_err(|errno| SmbError::Io(errno.into()))
    }

    /// Close a native cursor and release the session
    pub(crate) fn close_cursor(&self, cursor: B::Cursor) {
        let mut session = self.session();
        match session.backend.as_mut() {
            Some(backend) => {
                if let Err(errno) = backend.close_dir(cursor) {
                    warn!("failed to close directory: {}", errno);
                }
            }
            None => warn!("directory closed after smb session teardown"),
        }
        if session.release() {
            session.teardown();
        }
    }

    fn session(&self) -> MutexGuard<'_, Session<B>> {
        self.inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B: SmbBackend> Clone for Context<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: SmbBackend> Drop for ContextInner<B> {
    fn drop(&mut self) {
        self.session
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .teardown();
    }
}
