use std::path::PathBuf;

use folio_types::Digest;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store directory (on enumerate) or the value file (on delete) is absent.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An entry seen while listing the directory vanished before it was read.
    #[error("entry vanished before it could be read: {}", .0.display())]
    MissingEntry(PathBuf),

    /// The bytes of a stored file could not be decoded as the model type.
    #[error("cannot decode {}: {reason}", path.display())]
    DecodeFailure { path: PathBuf, reason: String },

    /// A file for this digest already exists.
    #[error("a value with digest {0} is already stored")]
    DuplicateKey(Digest),

    /// I/O error from the underlying file system.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The value could not be serialized.
    #[error("cannot encode value: {0}")]
    EncodeFailure(String),

    /// The value's digest could not be computed.
    #[error("cannot compute digest: {0}")]
    Digest(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
