//! # Storage Layer
//!
//! Notes live in a single [redb](https://docs.rs/redb) database file holding two
//! buckets (redb tables):
//!
//! ```text
//! Notes       note id (UUID string bytes) -> encoded note record
//! NotesTitle  title bytes                 -> note id bytes
//! ```
//!
//! [`Store`] owns the database for the lifetime of the process. All access goes
//! through a transaction:
//!
//! - [`Store::view`] runs a closure against a read-only snapshot ([`ReadTx`]).
//!   Any number of views may run at once, and they never observe a write that
//!   has not committed.
//! - [`Store::update`] runs a closure against a write transaction ([`WriteTx`]).
//!   Writers are serialized by redb. If the closure returns `Err`, the
//!   transaction is aborted and nothing it wrote becomes visible.
//!
//! Both buckets are touched through the same transaction, which is what keeps
//! the content bucket and the title index in step.
//!
//! ## Backends
//!
//! - [`Store::open`]: file-backed, the production store. The file is locked while
//!   open; a second opener waits up to the open timeout and then gives up with
//!   [`StorageError::Unavailable`].
//! - [`Store::in_memory`]: volatile, for tests.

use crate::error::{NotesError, Phase, Result, StorageError};
use redb::{Database, ReadTransaction, ReadableTable, TableDefinition, TableError, WriteTransaction};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

pub const NOTES_BUCKET: &str = "Notes";
pub const TITLES_BUCKET: &str = "NotesTitle";

pub const DEFAULT_OPEN_TIMEOUT: Duration = Duration::from_secs(1);
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// id -> encoded note
    Notes,
    /// title -> id
    Titles,
}

impl Bucket {
    pub const ALL: [Bucket; 2] = [Bucket::Notes, Bucket::Titles];

    pub fn name(self) -> &'static str {
        match self {
            Bucket::Notes => NOTES_BUCKET,
            Bucket::Titles => TITLES_BUCKET,
        }
    }

    fn definition(self) -> TableDefinition<'static, &'static [u8], &'static [u8]> {
        TableDefinition::new(self.name())
    }
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Memory => write!(f, "<memory>"),
        }
    }
}

/// Handle to the open notes database.
pub struct Store {
    db: Database,
    location: Location,
}

impl Store {
    /// Opens the database at `path`, creating the file and both buckets if needed.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, open_timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        prepare_file(path)?;

        let deadline = Instant::now() + open_timeout;
        let mut warned = false;
        let db = loop {
            match Database::builder().create(path) {
                Ok(db) => break db,
                Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                    if Instant::now() >= deadline {
                        return Err(StorageError::Unavailable {
                            path: path.to_path_buf(),
                            reason: format!(
                                "locked by another process (waited {}ms)",
                                open_timeout.as_millis()
                            ),
                        }
                        .into());
                    }
                    if !warned {
                        warn!("database is locked, waiting for it to be released");
                        warned = true;
                    }
                    thread::sleep(LOCK_RETRY_INTERVAL);
                }
                Err(redb::DatabaseError::Storage(redb::StorageError::Io(err))) => {
                    return Err(StorageError::Unavailable {
                        path: path.to_path_buf(),
                        reason: err.to_string(),
                    }
                    .into());
                }
                Err(err) => return Err(StorageError::io(Phase::Open, err).into()),
            }
        };

        let store = Self {
            db,
            location: Location::File(path.to_path_buf()),
        };
        store.ensure_buckets()?;
        info!("notes database opened");
        Ok(store)
    }

    /// A store with no backing file. Everything is lost when it is dropped.
    pub fn in_memory() -> Result<Self> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(|err| StorageError::io(Phase::Open, err))?;
        let store = Self {
            db,
            location: Location::Memory,
        };
        store.ensure_buckets()?;
        Ok(store)
    }

    fn ensure_buckets(&self) -> Result<()> {
        self.update(|tx| {
            for bucket in Bucket::ALL {
                tx.table(bucket)?;
            }
            Ok(())
        })
    }

    /// Runs `f` against a consistent read-only snapshot.
    pub fn view<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ReadTx) -> Result<T>,
    {
        let txn = self.db.begin_read()?;
        f(&ReadTx { txn })
    }

    /// Runs `f` in a write transaction, committing only if it returns `Ok`.
    pub fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&WriteTx) -> Result<T>,
    {
        let tx = WriteTx {
            txn: self.db.begin_write()?,
        };
        match f(&tx) {
            Ok(value) => {
                tx.txn.commit()?;
                Ok(value)
            }
            Err(err) => {
                debug!(error = %err, "rolling back write transaction");
                Err(after_rollback(err, tx.txn.abort()))
            }
        }
    }

    /// Releases the database. Consuming `self` guarantees no transaction can follow.
    pub fn close(self) {
        let location = self.location.clone();
        drop(self.db);
        info!(location = %location, "notes database closed");
    }
}

/// The closure's error is what the caller sees. A failed abort is only logged:
/// redb discards uncommitted writes when the transaction is dropped anyway.
fn after_rollback<E: std::fmt::Display>(
    err: NotesError,
    aborted: std::result::Result<(), E>,
) -> NotesError {
    if let Err(abort_err) = aborted {
        let abort_err = StorageError::io(Phase::Abort, abort_err);
        warn!(error = %abort_err, cause = %err, "rollback failed");
    }
    err
}

/// Creates the database file with owner-only permissions before redb opens it.
fn prepare_file(path: &Path) -> Result<()> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
        .open(path)
        .map(|_| ())
        .map_err(|err| {
            NotesError::from(StorageError::Unavailable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })
        })
}

/// Read access shared by both transaction kinds.
pub trait Snapshot {
    fn get(&self, bucket: Bucket, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Visits every entry of `bucket` in key order, stopping at the first error.
    fn for_each<F>(&self, bucket: Bucket, f: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8]) -> Result<()>;
}

pub struct ReadTx {
    txn: ReadTransaction,
}

impl ReadTx {
    fn table(&self, bucket: Bucket) -> Result<redb::ReadOnlyTable<&'static [u8], &'static [u8]>> {
        self.txn.open_table(bucket.definition()).map_err(|err| {
            match err {
                TableError::TableDoesNotExist(_) => StorageError::MissingBucket(bucket.name()),
                other => StorageError::io(Phase::Read(bucket.name()), other),
            }
            .into()
        })
    }
}

impl Snapshot for ReadTx {
    fn get(&self, bucket: Bucket, key: &[u8]) -> Result<Option<Vec<u8>>> {
        read_value(&self.table(bucket)?, bucket, key)
    }

    fn for_each<F>(&self, bucket: Bucket, f: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8]) -> Result<()>,
    {
        scan(&self.table(bucket)?, bucket, f)
    }
}

pub struct WriteTx {
    txn: WriteTransaction,
}

impl WriteTx {
    fn table(&self, bucket: Bucket) -> Result<redb::Table<'_, &'static [u8], &'static [u8]>> {
        self.txn
            .open_table(bucket.definition())
            .map_err(|err| StorageError::io(Phase::Write(bucket.name()), err).into())
    }

    pub fn put(&self, bucket: Bucket, key: &[u8], value: &[u8]) -> Result<()> {
        let mut table = self.table(bucket)?;
        table
            .insert(key, value)
            .map_err(|err| StorageError::io(Phase::Write(bucket.name()), err))?;
        Ok(())
    }

    /// Removes `key`, returning whether it was present.
    pub fn delete(&self, bucket: Bucket, key: &[u8]) -> Result<bool> {
        let mut table = self.table(bucket)?;
        let existed = table
            .remove(key)
            .map_err(|err| StorageError::io(Phase::Write(bucket.name()), err))?
            .is_some();
        Ok(existed)
    }
}

impl Snapshot for WriteTx {
    fn get(&self, bucket: Bucket, key: &[u8]) -> Result<Option<Vec<u8>>> {
        read_value(&self.table(bucket)?, bucket, key)
    }

    fn for_each<F>(&self, bucket: Bucket, f: F) -> Result<()>
    where
        F: FnMut(&[u8], &[u8]) -> Result<()>,
    {
        scan(&self.table(bucket)?, bucket, f)
    }
}

fn read_value<T>(table: &T, bucket: Bucket, key: &[u8]) -> Result<Option<Vec<u8>>>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let value = table
        .get(key)
        .map_err(|err| StorageError::io(Phase::Read(bucket.name()), err))?;
    Ok(value.map(|guard| guard.value().to_vec()))
}

fn scan<T, F>(table: &T, bucket: Bucket, mut f: F) -> Result<()>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
    F: FnMut(&[u8], &[u8]) -> Result<()>,
{
    let entries = table
        .iter()
        .map_err(|err| StorageError::io(Phase::Read(bucket.name()), err))?;
    for entry in entries {
        let (key, value) = entry.map_err(|err| StorageError::io(Phase::Read(bucket.name()), err))?;
        f(key.value(), value.value())?;
    }
    Ok(())
}
