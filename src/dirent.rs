//! # dirent
//!
//! Directory entries and the packed record format they are decoded from.
//!
//! A fill of the scratch buffer holds one or more consecutive records laid out as:
//!
//! | offset     | size  | field                                       |
//! |------------|-------|---------------------------------------------|
//! | 0          | 4     | record length, padding included (LE `u32`)  |
//! | 4          | 4     | type code (LE `u32`, libsmbclient `SMBC_*`) |
//! | 8          | n + 1 | name, NUL terminated                        |
//! | 8 + n + 1  | m + 1 | comment, NUL terminated                     |
//! | ...        | pad   | zero padding up to the record length        |

use std::collections::VecDeque;
use std::fmt;

use crate::{Errno, SmbError, SmbResult};

const HEADER_LEN: usize = 8;
const RECORD_ALIGN: usize = 4;
/// Smallest valid record: header plus two empty strings
pub const MIN_RECORD_LEN: usize = HEADER_LEN + 2;

/// Type of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DirEntryType {
    Workgroup = 1,
    Server = 2,
    FileShare = 3,
    PrinterShare = 4,
    CommsShare = 5,
    IpcShare = 6,
    Dir = 7,
    File = 8,
    Link = 9,
}

impl DirEntryType {
    /// Numeric code used in packed records
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for DirEntryType {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Workgroup),
            2 => Ok(Self::Server),
            3 => Ok(Self::FileShare),
            4 => Ok(Self::PrinterShare),
            5 => Ok(Self::CommsShare),
            6 => Ok(Self::IpcShare),
            7 => Ok(Self::Dir),
            8 => Ok(Self::File),
            9 => Ok(Self::Link),
            code => Err(code),
        }
    }
}

/// A name returned by a directory enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirEntry {
    name: String,
    comment: String,
    kind: DirEntryType,
}

impl DirEntry {
    pub fn new<S: AsRef<str>>(name: S, comment: S, kind: DirEntryType) -> Self {
        Self {
            name: name.as_ref().to_string(),
            comment: comment.as_ref().to_string(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry comment; usually empty except for servers and shares
    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn get_type(&self) -> DirEntryType {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == DirEntryType::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == DirEntryType::File
    }

    pub fn is_share(&self) -> bool {
        matches!(
            self.kind,
            DirEntryType::FileShare
                | DirEntryType::PrinterShare
                | DirEntryType::CommsShare
                | DirEntryType::IpcShare
        )
    }

    /// Length of this entry once packed, padded to a 4 byte boundary
    pub fn packed_len(&self) -> usize {
        let used = HEADER_LEN + self.name.len() + 1 + self.comment.len() + 1;
        used.div_ceil(RECORD_ALIGN) * RECORD_ALIGN
    }
}

impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.comment.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.comment)
        }
    }
}

/// Pack `entry` at the start of `buf`.
///
/// Returns the number of bytes written, or `None` if the record doesn't fit in `buf`
/// or one of its strings contains a NUL byte.
pub fn pack_record(entry: &DirEntry, buf: &mut [u8]) -> Option<usize> {
    pack_record_padded(entry, entry.packed_len(), buf)
}

/// Pack as many of the pending `entries` as fit in `buf`, removing the packed ones.
///
/// Returns the number of bytes filled, `0` once `entries` is empty. Fails with `EINVAL`
/// if the next entry doesn't fit even in the empty buffer; the entry is kept pending.
pub fn pack_records(entries: &mut VecDeque<DirEntry>, buf: &mut [u8]) -> Result<usize, Errno> {
    let mut filled = 0;
    while let Some(entry) = entries.front() {
        match pack_record(entry, &mut buf[filled..]) {
            Some(len) => {
                filled += len;
                entries.pop_front();
            }
            None if filled == 0 => {
                error!(
                    "dirent '{}' ({} bytes) can't be packed into a {} bytes buffer",
                    entry.name(),
                    entry.packed_len(),
                    buf.len()
                );
                return Err(Errno(libc::EINVAL));
            }
            None => break,
        }
    }
    Ok(filled)
}

/// Pack `entry` into exactly `record_len` bytes, zero padded
pub(crate) fn pack_record_padded(
    entry: &DirEntry,
    record_len: usize,
    buf: &mut [u8],
) -> Option<usize> {
    let name = entry.name.as_bytes();
    let comment = entry.comment.as_bytes();
    if name.contains(&0) || comment.contains(&0) {
        return None;
    }
    let used = HEADER_LEN + name.len() + 1 + comment.len() + 1;
    if record_len < used || record_len > buf.len() {
        return None;
    }
    let record_len_field = u32::try_from(record_len).ok()?;
    let record = &mut buf[..record_len];
    record.fill(0);
    record[0..4].copy_from_slice(&record_len_field.to_le_bytes());
    record[4..HEADER_LEN].copy_from_slice(&entry.kind.code().to_le_bytes());
    let name_end = HEADER_LEN + name.len();
    record[HEADER_LEN..name_end].copy_from_slice(name);
    let comment_start = name_end + 1;
    record[comment_start..comment_start + comment.len()].copy_from_slice(comment);
    Some(record_len)
}

/// Walks the records held by the filled part of a scratch buffer.
///
/// Yields an error and stops at the first malformed record.
pub(crate) struct Records<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Records<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }
}

impl Iterator for Records<'_> {
    type Item = SmbResult<DirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = &self.buf[self.offset..];
        if remaining.is_empty() {
            return None;
        }
        match decode_record(remaining) {
            Ok((entry, record_len)) => {
                self.offset += record_len;
                Some(Ok(entry))
            }
            Err(err) => {
                self.offset = self.buf.len();
                Some(Err(err))
            }
        }
    }
}

/// Decode the record at the start of `buf`, returning it with its self length
fn decode_record(buf: &[u8]) -> SmbResult<(DirEntry, usize)> {
    if buf.len() < HEADER_LEN {
        return Err(SmbError::invalid_data(format!(
            "truncated dirent header: {} bytes left",
            buf.len()
        )));
    }
    let record_len = read_u32(buf, 0) as usize;
    if record_len < MIN_RECORD_LEN || record_len > buf.len() {
        return Err(SmbError::invalid_data(format!(
            "bad dirent length {record_len} with {} bytes left",
            buf.len()
        )));
    }
    let kind = DirEntryType::try_from(read_u32(buf, 4))
        .map_err(|code| SmbError::invalid_data(format!("unknown dirent type {code}")))?;
    let (name, rest) = split_cstr(&buf[HEADER_LEN..record_len])?;
    let (comment, _) = split_cstr(rest)?;
    Ok((
        DirEntry {
            name,
            comment,
            kind,
        },
        record_len,
    ))
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&buf[at..at + 4]);
    u32::from_le_bytes(raw)
}

fn split_cstr(buf: &[u8]) -> SmbResult<(String, &[u8])> {
    let nul = buf
        .iter()
        .position(|b| *b == 0)
        .ok_or_else(|| SmbError::invalid_data("unterminated dirent field"))?;
    Ok((
        String::from_utf8_lossy(&buf[..nul]).into_owned(),
        &buf[nul + 1..],
    ))
}
