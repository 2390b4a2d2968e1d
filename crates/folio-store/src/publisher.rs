use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use folio_types::Digest;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::model::{Encoding, Model};

/// File name prefix reserved for in-flight writes. Entries carrying it are
/// never treated as stored values.
pub const TEMP_PREFIX: &str = ".folio-tmp-";

/// A directory of digest-named files, one per stored `M`.
///
/// `Publisher` holds no state beyond its configuration. It caches no index,
/// and concurrent use of one directory is not coordinated: callers that
/// share a directory across threads must serialize access themselves.
pub struct Publisher<M> {
    config: StoreConfig,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> Publisher<M> {
    /// Bind a store to `directory`. Performs no I/O; the directory is
    /// created on the first `put`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::from_config(StoreConfig::new(directory))
    }

    pub fn from_config(config: StoreConfig) -> Self {
        Self {
            config,
            _model: PhantomData,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    pub fn encoding(&self) -> Encoding {
        self.config.encoding
    }

    /// Path of the file that holds (or would hold) the value keyed by `key`.
    pub fn path_for(&self, key: &Digest) -> PathBuf {
        self.config.directory.join(key.to_hex())
    }

    /// Load every stored value.
    ///
    /// Fails with [`StoreError::NotFound`] if the directory does not exist.
    /// An existing, empty directory yields an empty list. Any entry that
    /// cannot be read or decoded aborts the whole call. Order follows the
    /// file system and is not stable.
    pub fn enumerate(&self) -> StoreResult<Vec<M>> {
        let dir = self.directory();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(dir.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut values = Vec::new();
        for entry in entries {
            let name = entry?.file_name();
            if is_temp_name(&name) {
                continue;
            }
            let path = dir.join(&name);
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(StoreError::MissingEntry(path));
                }
                Err(e) => return Err(e.into()),
            };
            let value = self
                .config
                .encoding
                .decode(&bytes)
                .map_err(|reason| StoreError::DecodeFailure { path, reason })?;
            values.push(value);
        }

        debug!(dir = %dir.display(), count = values.len(), "enumerated stored values");
        Ok(values)
    }

    /// Store `value` in a new file named by its digest, creating the
    /// directory if needed. Returns the digest.
    ///
    /// Never overwrites: if a file for the digest exists, fails with
    /// [`StoreError::DuplicateKey`]. The file appears whole or not at all.
    pub fn put(&self, value: &M) -> StoreResult<Digest> {
        let bytes = self.config.encoding.encode(value)?;
        let key = value.digest()?;
        let dir = self.directory();
        fs::create_dir_all(dir)?;

        let target = self.path_for(&key);
        if target.try_exists()? {
            return Err(StoreError::DuplicateKey(key));
        }

        let mut tmp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(dir)?;
        tmp.write_all(&bytes)?;
        if self.config.sync_writes {
            tmp.as_file().sync_all()?;
        }
        // The temp file is removed when `e.file` drops.
        tmp.persist_noclobber(&target).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                StoreError::DuplicateKey(key)
            } else {
                StoreError::Io(e.error)
            }
        })?;

        debug!(dir = %dir.display(), key = %key.short_hex(), bytes = bytes.len(), "published value");
        Ok(key)
    }

    /// Remove the file holding `value`. Fails with [`StoreError::NotFound`]
    /// if there is none.
    pub fn delete(&self, value: &M) -> StoreResult<()> {
        let key = value.digest()?;
        let path = self.path_for(&key);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(dir = %self.directory().display(), key = %key.short_hex(), "deleted value");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(path)),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a file for `value`'s digest exists.
    pub fn contains(&self, value: &M) -> StoreResult<bool> {
        let key = value.digest()?;
        Ok(self.path_for(&key).try_exists()?)
    }

    /// Swap `old` for `new`: publish `new`, then delete `old`.
    ///
    /// `old` must be stored. Publishing first means a failed `put` leaves
    /// `old` untouched. Equal digests write nothing.
    pub fn replace(&self, old: &M, new: &M) -> StoreResult<Digest> {
        let old_key = old.digest()?;
        let new_key = new.digest()?;
        let old_path = self.path_for(&old_key);
        if !old_path.try_exists()? {
            return Err(StoreError::NotFound(old_path));
        }
        if old_key == new_key {
            return Ok(new_key);
        }
        self.put(new)?;
        self.delete(old)?;
        Ok(new_key)
    }
}

fn is_temp_name(name: &OsStr) -> bool {
    name.to_str().is_some_and(|n| n.starts_with(TEMP_PREFIX))
}

impl<M> Clone for Publisher<M> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            _model: PhantomData,
        }
    }
}

impl<M> fmt::Debug for Publisher<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("directory", &self.config.directory)
            .field("encoding", &self.config.encoding)
            .finish()
    }
}
