//! # remote utils
//!
//! Conversions into remotefs types

use std::path::Path;

use remotefs::fs::{FileType, Metadata};
use remotefs::{File, RemoteError, RemoteErrorType};

use crate::{DirEntry, DirEntryType, SmbError};

/// Convert a `DirEntry` listed in `parent` to `File`.
///
/// Only files, directories and links have a `File` counterpart; other entries yield `None`
pub fn dirent_to_file<P: AsRef<Path>>(parent: P, entry: &DirEntry) -> Option<File> {
    let file_type = match entry.get_type() {
        DirEntryType::File => FileType::File,
        DirEntryType::Dir => FileType::Directory,
        DirEntryType::Link => FileType::Symlink,
        _ => return None,
    };
    Some(File {
        path: parent.as_ref().join(entry.name()),
        metadata: Metadata::default().file_type(file_type),
    })
}

impl From<SmbError> for RemoteError {
    fn from(err: SmbError) -> Self {
        let kind = match &err {
            SmbError::Configuration(_) => RemoteErrorType::BadAddress,
            SmbError::PermissionDenied(_) => RemoteErrorType::CouldNotOpenFile,
            SmbError::NotFound(_) => RemoteErrorType::StatFailed,
            SmbError::OutOfMemory => RemoteErrorType::ProtocolError,
            SmbError::Io(_) => RemoteErrorType::IoError,
        };
        RemoteError::new_ex(kind, err)
    }
}

#[cfg(test)]
mod test {

    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn should_convert_dirent_to_file() {
        let file = dirent_to_file("/cargo-test", &DirEntry::new("a.txt", "", DirEntryType::File))
            .unwrap();
        assert_eq!(file.path, PathBuf::from("/cargo-test/a.txt"));
        assert_eq!(file.metadata.file_type, FileType::File);
        let dir = dirent_to_file("/cargo-test", &DirEntry::new("b", "", DirEntryType::Dir))
            .unwrap();
        assert_eq!(dir.metadata.file_type, FileType::Directory);
        let link = dirent_to_file("/cargo-test", &DirEntry::new("c", "", DirEntryType::Link))
            .unwrap();
        assert_eq!(link.metadata.file_type, FileType::Symlink);
    }

    #[test]
    fn should_not_convert_shares() {
        assert!(dirent_to_file("/", &DirEntry::new("temp", "", DirEntryType::FileShare)).is_none());
        assert!(dirent_to_file("/", &DirEntry::new("PAVAO", "", DirEntryType::Workgroup)).is_none());
    }

    #[test]
    fn should_convert_errors() {
        assert_eq!(
            RemoteError::from(SmbError::NotFound(String::from("a"))).kind,
            RemoteErrorType::StatFailed
        );
        assert_eq!(
            RemoteError::from(SmbError::PermissionDenied(String::from("a"))).kind,
            RemoteErrorType::CouldNotOpenFile
        );
        assert_eq!(
            RemoteError::from(SmbError::Configuration(String::from("a"))).kind,
            RemoteErrorType::BadAddress
        );
        assert_eq!(
            RemoteError::from(SmbError::Io(std::io::Error::from_raw_os_error(libc::EIO))).kind,
            RemoteErrorType::IoError
        );
    }
}
