//! ## Mock
//!
//! Contains mock for test units

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::backend::SmbBackend;
use crate::dirent::{pack_record_padded, pack_records};
use crate::{Context, DirEntry, Errno, SmbCredentials, SmbOptions, SmbResult};

// -- logger

#[allow(dead_code)]
pub fn logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// -- context

/// Open a context on `smb://localhost:3445/temp` backed by `backend`
pub fn context(backend: MockBackend) -> SmbResult<Context<MockBackend>> {
    context_with_options(backend, SmbOptions::default())
}

pub fn context_with_options(
    backend: MockBackend,
    options: SmbOptions,
) -> SmbResult<Context<MockBackend>> {
    Context::open(
        backend,
        SmbCredentials::default()
            .server("smb://localhost:3445")
            .share("/temp")
            .username("test")
            .password("test")
            .workgroup("pavao"),
        options,
    )
}

// -- backend

/// One scripted answer to `fill_dirents`
#[derive(Debug, Clone)]
enum MockFill {
    /// Records packed with explicit lengths, in one fill
    Padded(Vec<(DirEntry, usize)>),
    /// Entries packed across as many fills as the buffer requires
    Stream(VecDeque<DirEntry>),
    /// Bytes copied as they are; the full length is reported as filled
    Raw(Vec<u8>),
    Fail(i32),
}

/// Scripted directory
#[derive(Debug, Default, Clone)]
pub struct MockDir {
    fills: Vec<MockFill>,
    open_error: Option<i32>,
}

impl MockDir {
    /// Serve `entries`, packed into as few fills as the buffer allows
    pub fn fill(mut self, entries: Vec<DirEntry>) -> Self {
        self.fills.push(MockFill::Stream(entries.into()));
        self
    }

    /// Serve one fill holding `records`, each padded to its length
    pub fn fill_padded(mut self, records: Vec<(DirEntry, usize)>) -> Self {
        self.fills.push(MockFill::Padded(records));
        self
    }

    pub fn raw(mut self, bytes: Vec<u8>) -> Self {
        self.fills.push(MockFill::Raw(bytes));
        self
    }

    /// Fail the next fill with `errno`
    pub fn fail(mut self, errno: i32) -> Self {
        self.fills.push(MockFill::Fail(errno));
        self
    }

    /// Fail opening the directory with `errno`
    pub fn deny(mut self, errno: i32) -> Self {
        self.open_error = Some(errno);
        self
    }
}

#[derive(Debug, Default)]
struct Counters {
    inits: AtomicUsize,
    opened_dirs: AtomicUsize,
    closed_dirs: AtomicUsize,
    fills: AtomicUsize,
    shutdowns: AtomicUsize,
}

/// Counters shared with a `MockBackend` moved into a context
#[derive(Debug, Default, Clone)]
pub struct MockProbe {
    counters: Arc<Counters>,
}

impl MockProbe {
    pub fn inits(&self) -> usize {
        self.counters.inits.load(Ordering::SeqCst)
    }

    pub fn opened_dirs(&self) -> usize {
        self.counters.opened_dirs.load(Ordering::SeqCst)
    }

    pub fn closed_dirs(&self) -> usize {
        self.counters.closed_dirs.load(Ordering::SeqCst)
    }

    pub fn fills(&self) -> usize {
        self.counters.fills.load(Ordering::SeqCst)
    }

    pub fn shutdowns(&self) -> usize {
        self.counters.shutdowns.load(Ordering::SeqCst)
    }
}

/// In memory backend serving scripted directories keyed by uri
#[derive(Debug, Default)]
pub struct MockBackend {
    dirs: HashMap<String, MockDir>,
    init_error: Option<i32>,
    close_error: Option<i32>,
    probe: MockProbe,
}

impl MockBackend {
    pub fn dir<S: AsRef<str>>(mut self, uri: S, dir: MockDir) -> Self {
        self.dirs.insert(uri.as_ref().to_string(), dir);
        self
    }

    pub fn fail_init(mut self, errno: i32) -> Self {
        self.init_error = Some(errno);
        self
    }

    pub fn fail_close(mut self, errno: i32) -> Self {
        self.close_error = Some(errno);
        self
    }

    pub fn probe(&self) -> MockProbe {
        self.probe.clone()
    }
}

#[derive(Debug)]
pub struct MockCursor {
    fills: VecDeque<MockFill>,
}

impl SmbBackend for MockBackend {
    type Cursor = MockCursor;

    fn init(&mut self, _credentials: &SmbCredentials, _options: &SmbOptions) -> Result<(), Errno> {
        self.probe.counters.inits.fetch_add(1, Ordering::SeqCst);
        match self.init_error {
            Some(errno) => Err(Errno(errno)),
            None => Ok(()),
        }
    }

    fn open_dir(&mut self, uri: &str) -> Result<Self::Cursor, Errno> {
        let dir = self.dirs.get(uri).ok_or(Errno(libc::ENOENT))?;
        if let Some(errno) = dir.open_error {
            return Err(Errno(errno));
        }
        self.probe.counters.opened_dirs.fetch_add(1, Ordering::SeqCst);
        Ok(MockCursor {
            fills: dir.fills.iter().cloned().collect(),
        })
    }

    fn fill_dirents(&mut self, cursor: &mut Self::Cursor, buf: &mut [u8]) -> Result<usize, Errno> {
        self.probe.counters.fills.fetch_add(1, Ordering::SeqCst);
        // an empty stream has nothing to hand out; the next scripted fill answers
        while matches!(cursor.fills.front(), Some(MockFill::Stream(entries)) if entries.is_empty()) {
            cursor.fills.pop_front();
        }
        let Some(fill) = cursor.fills.front_mut() else {
            return Ok(0);
        };
        let filled = match fill {
            MockFill::Padded(records) => {
                let mut offset = 0;
                for (entry, len) in records.iter() {
                    offset += pack_record_padded(entry, *len, &mut buf[offset..])
                        .ok_or(Errno(libc::EINVAL))?;
                }
                offset
            }
            MockFill::Stream(entries) => {
                let filled = pack_records(entries, buf)?;
                if !entries.is_empty() {
                    return Ok(filled);
                }
                filled
            }
            MockFill::Raw(bytes) => {
                let len = bytes.len().min(buf.len());
                buf[..len].copy_from_slice(&bytes[..len]);
                bytes.len()
            }
            MockFill::Fail(errno) => return Err(Errno(*errno)),
        };
        cursor.fills.pop_front();
        Ok(filled)
    }

    fn close_dir(&mut self, _cursor: Self::Cursor) -> Result<(), Errno> {
        self.probe.counters.closed_dirs.fetch_add(1, Ordering::SeqCst);
        match self.close_error {
            Some(errno) => Err(Errno(errno)),
            None => Ok(()),
        }
    }

    fn shutdown(&mut self) {
        self.probe.counters.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}
