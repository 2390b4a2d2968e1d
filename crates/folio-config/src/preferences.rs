use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};

/// Persistent key-value preferences stored as one JSON object on disk.
///
/// Changes are held in memory until [`Preferences::save`].
#[derive(Clone, Debug)]
pub struct Preferences {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl Preferences {
    /// Open the preference file at `path`. A missing file is an empty set.
    pub fn open(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> ConfigResult<Option<T>> {
        self.values
            .get(key)
            .map(|v| {
                T::deserialize(v).map_err(|e| ConfigError::Parse(format!("preference {key}: {e}")))
            })
            .transpose()
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> ConfigResult<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| ConfigError::Parse(format!("preference {key}: {e}")))?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    /// Remove `key`. Returns `true` if it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Write all preferences, replacing the file atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        let bytes = serde_json::to_vec_pretty(&self.values)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| ConfigError::Io(e.error))?;

        debug!(path = %self.path.display(), keys = self.values.len(), "saved preferences");
        Ok(())
    }
}

/// A typed preference with a fallback value.
#[derive(Clone, Debug)]
pub struct Preference<T> {
    key: String,
    default: T,
}

impl<T> Preference<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(key: impl Into<String>, default: T) -> Self {
        Self {
            key: key.into(),
            default,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// The stored value, or the default if it is unset or no longer decodes.
    pub fn get(&self, prefs: &Preferences) -> T {
        match prefs.get(&self.key) {
            Ok(Some(value)) => value,
            Ok(None) => self.default.clone(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring unreadable preference");
                self.default.clone()
            }
        }
    }

    pub fn set(&self, prefs: &mut Preferences, value: &T) -> ConfigResult<()> {
        prefs.set(&self.key, value)
    }

    /// Forget the stored value so the default applies again.
    pub fn reset(&self, prefs: &mut Preferences) {
        prefs.remove(&self.key);
    }
}
