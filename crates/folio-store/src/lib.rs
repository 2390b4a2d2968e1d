//! Digest-keyed object persistence for Folio.
//!
//! A [`Publisher`] binds one directory to one value type. Every value it
//! stores lives in its own file, named by the hex rendering of the value's
//! content [`Digest`](folio_types::Digest):
//!
//! ```text
//! <directory>/
//!   3f9a...e1   <- encoded value
//!   b07c...42   <- encoded value
//! ```
//!
//! # Design Rules
//!
//! 1. Files are never rewritten in place. Changing a value means publishing
//!    the new one and deleting the old one.
//! 2. At most one file per digest. A second `put` of the same digest fails
//!    with [`StoreError::DuplicateKey`]; nothing is overwritten.
//! 3. Writes are all-or-nothing: bytes go to a temp file in the same
//!    directory and are persisted into place only once complete.
//! 4. No index is cached. Every call derives its path from the digest and
//!    asks the file system.
//! 5. All errors are returned to the caller. Nothing is retried or logged
//!    and dropped.

pub mod config;
pub mod error;
pub mod model;
pub mod publisher;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use model::{Encoding, Model};
pub use publisher::{Publisher, TEMP_PREFIX};
