//! # smbclient
//!
//! Backend running on libsmbclient through `pavao`

use std::collections::VecDeque;

use pavao::{SmbClient, SmbDirent, SmbDirentType, SmbError};

use super::SmbBackend;
use crate::dirent::pack_records;
use crate::utils::uri as uri_utils;
use crate::{DirEntry, DirEntryType, Errno, SmbCredentials, SmbOptions};

/// libsmbclient session.
///
/// pavao prepends the share root to every path, so uris are opened relative to it.
#[derive(Default)]
pub struct PavaoBackend {
    client: Option<SmbClient>,
    /// `smb://address[:port]/share`, as pavao builds it
    base: String,
}

impl PavaoBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Entries listed on open, not yet handed out by a fill
pub struct PavaoCursor {
    entries: VecDeque<DirEntry>,
}

impl SmbBackend for PavaoBackend {
    type Cursor = PavaoCursor;

    fn init(&mut self, credentials: &SmbCredentials, options: &SmbOptions) -> Result<(), Errno> {
        let mut smb_credentials = pavao::SmbCredentials::default()
            .server(credentials.get_server().trim_end_matches('/'))
            .share(uri_utils::normalized_share(credentials));
        if let Some(username) = credentials.get_username() {
            smb_credentials = smb_credentials.username(username);
        }
        if let Some(password) = credentials.get_password() {
            smb_credentials = smb_credentials.password(password);
        }
        if let Some(workgroup) = credentials.get_workgroup() {
            smb_credentials = smb_credentials.workgroup(workgroup);
        }
        let smb_options = pavao::SmbOptions::default()
            .case_sensitive(options.get_case_sensitive())
            .one_share_per_server(options.get_one_share_per_server())
            .no_auto_anonymous_login(options.get_no_auto_anonymous_login());
        let client = SmbClient::new(smb_credentials, smb_options).map_err(|e| {
            let errno = smb_error_errno(&e);
            error!("failed to create smb client: {} ({})", e, errno);
            errno
        })?;
        self.client = Some(client);
        self.base = uri_utils::share_base(credentials);
        Ok(())
    }

    fn open_dir(&mut self, uri: &str) -> Result<Self::Cursor, Errno> {
        let client = self.client.as_ref().ok_or(Errno(libc::EBADF))?;
        let path = uri_utils::share_path(&self.base, uri).ok_or_else(|| {
            error!("{} is outside of the session share {}", uri, self.base);
            Errno(libc::EINVAL)
        })?;
        let dirents = client.list_dir(path.as_str()).map_err(|e| {
            let errno = smb_error_errno(&e);
            debug!("failed to list {}: {} ({})", uri, e, errno);
            errno
        })?;
        Ok(PavaoCursor {
            entries: dirents.iter().map(smb_dirent_to_entry).collect(),
        })
    }

    fn fill_dirents(&mut self, cursor: &mut Self::Cursor, buf: &mut [u8]) -> Result<usize, Errno> {
        pack_records(&mut cursor.entries, buf)
    }

    fn close_dir(&mut self, cursor: Self::Cursor) -> Result<(), Errno> {
        if !cursor.entries.is_empty() {
            trace!("closing directory with {} unread entries", cursor.entries.len());
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        // dropping the client frees the libsmbclient context
        self.client = None;
    }
}

fn smb_dirent_to_entry(dirent: &SmbDirent) -> DirEntry {
    let kind = match dirent.get_type() {
        SmbDirentType::Workgroup => DirEntryType::Workgroup,
        SmbDirentType::Server => DirEntryType::Server,
        SmbDirentType::FileShare => DirEntryType::FileShare,
        SmbDirentType::PrinterShare => DirEntryType::PrinterShare,
        SmbDirentType::CommsShare => DirEntryType::CommsShare,
        SmbDirentType::IpcShare => DirEntryType::IpcShare,
        SmbDirentType::Dir => DirEntryType::Dir,
        SmbDirentType::File => DirEntryType::File,
        SmbDirentType::Link => DirEntryType::Link,
    };
    DirEntry::new(dirent.name(), dirent.comment(), kind)
}

/// Errno carried by a pavao error
fn smb_error_errno(err: &SmbError) -> Errno {
    match err {
        SmbError::Io(e) => match e.raw_os_error() {
            Some(code) if code != 0 => Errno(code),
            _ => Errno::last(),
        },
        SmbError::BadFileDescriptor => Errno::last(),
        _ => Errno(libc::EIO),
    }
}
