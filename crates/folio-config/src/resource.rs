use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{ConfigError, ConfigResult};
use crate::paths::ensure_relative;

/// Read-only source of bundled assets, addressed by relative key.
pub trait ResourceLoader {
    fn load(&self, key: &str) -> ConfigResult<Vec<u8>>;
}

/// Assets shipped as files under a root directory.
#[derive(Clone, Debug)]
pub struct BundleDir {
    root: PathBuf,
}

impl BundleDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceLoader for BundleDir {
    fn load(&self, key: &str) -> ConfigResult<Vec<u8>> {
        ensure_relative(Path::new(key))?;
        match fs::read(self.root.join(key)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ConfigError::ResourceNotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Embedded assets, e.g. built from `include_bytes!`.
impl ResourceLoader for BTreeMap<String, Vec<u8>> {
    fn load(&self, key: &str) -> ConfigResult<Vec<u8>> {
        self.get(key)
            .cloned()
            .ok_or_else(|| ConfigError::ResourceNotFound(key.to_string()))
    }
}

/// Load `key` and decode it as JSON.
pub fn decode_resource<T, L>(loader: &L, key: &str) -> ConfigResult<T>
where
    T: DeserializeOwned,
    L: ResourceLoader + ?Sized,
{
    let bytes = loader.load(key)?;
    serde_json::from_slice(&bytes).map_err(|e| ConfigError::Parse(format!("{key}: {e}")))
}
