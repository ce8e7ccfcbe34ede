use crate::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("invalid note title: {0}")]
    Validation(#[from] ValidationError),

    #[error("a note titled {title:?} already exists")]
    DuplicateTitle { title: String },

    #[error("no note titled {title:?}")]
    NotFound { title: String },

    #[error("store is corrupt: {0}")]
    Corruption(#[from] CorruptionError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Editor error: {0}")]
    Editor(String),
}

/// Failures of the embedded store itself, as opposed to its contents.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("notes database {} is unavailable: {reason}", path.display())]
    Unavailable { path: PathBuf, reason: String },

    #[error("bucket {0:?} does not exist")]
    MissingBucket(&'static str),

    #[error("storage failure during {phase}: {message}")]
    IoFailure { phase: Phase, message: String },
}

impl StorageError {
    pub(crate) fn io(phase: Phase, err: impl std::fmt::Display) -> Self {
        StorageError::IoFailure {
            phase,
            message: err.to_string(),
        }
    }
}

/// The step of a transaction that failed, carried in [`StorageError::IoFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Open,
    Begin,
    Read(&'static str),
    Write(&'static str),
    Commit,
    Abort,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Open => write!(f, "open"),
            Phase::Begin => write!(f, "begin transaction"),
            Phase::Read(bucket) => write!(f, "read of bucket {:?}", bucket),
            Phase::Write(bucket) => write!(f, "write to bucket {:?}", bucket),
            Phase::Commit => write!(f, "commit"),
            Phase::Abort => write!(f, "abort"),
        }
    }
}

/// The title index and the content bucket disagree, or a record is unreadable.
#[derive(Error, Debug)]
pub enum CorruptionError {
    #[error("title {title:?} maps to note {id}, which does not exist")]
    DanglingTitle { id: String, title: String },

    #[error("note {id} could not be decoded: {source}")]
    UndecodableNote {
        id: String,
        #[source]
        source: CodecError,
    },

    #[error("title {indexed:?} maps to note {id}, but that record is titled {stored:?}")]
    MismatchedRecord {
        id: String,
        indexed: String,
        stored: String,
    },

    #[error("{problems} consistency problem(s) found; run `notes doctor --repair`")]
    Inconsistent { problems: usize },
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("malformed note record: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("could not encode note: {0}")]
    Unencodable(#[source] serde_json::Error),
}

impl From<redb::TransactionError> for StorageError {
    fn from(err: redb::TransactionError) -> Self {
        StorageError::io(Phase::Begin, err)
    }
}

impl From<redb::CommitError> for StorageError {
    fn from(err: redb::CommitError) -> Self {
        StorageError::io(Phase::Commit, err)
    }
}

impl From<redb::TransactionError> for NotesError {
    fn from(err: redb::TransactionError) -> Self {
        NotesError::Storage(err.into())
    }
}

impl From<redb::CommitError> for NotesError {
    fn from(err: redb::CommitError) -> Self {
        NotesError::Storage(err.into())
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;
