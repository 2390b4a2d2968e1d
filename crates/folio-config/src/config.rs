use std::fs;
use std::path::{Path, PathBuf};

use folio_store::{Encoding, StoreConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::paths::Location;

/// Top-level application configuration, usually read from `folio.toml`.
///
/// ```toml
/// [store]
/// collection = "notes"
/// location = "exposed"
/// encoding = "json"
/// sync_writes = true
/// # directory = "/srv/folio/notes"   # overrides location + collection
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub store: StoreSection,
}

/// The `[store]` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Path segment joined onto the base directory for `location`.
    pub collection: String,
    pub location: Location,
    /// Absolute directory that takes precedence over `location` + `collection`.
    pub directory: Option<PathBuf>,
    pub encoding: Encoding,
    pub sync_writes: bool,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            collection: "objects".into(),
            location: Location::default(),
            directory: None,
            encoding: Encoding::default(),
            sync_writes: true,
        }
    }
}

impl FolioConfig {
    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve the store directory and build a [`StoreConfig`].
    pub fn resolve_store(&self) -> ConfigResult<StoreConfig> {
        let section = &self.store;
        let directory = match &section.directory {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => return Err(ConfigError::RelativeDirectory(dir.clone())),
            None => section.location.join(&section.collection)?,
        };
        debug!(dir = %directory.display(), encoding = %section.encoding, "resolved store directory");
        Ok(StoreConfig::new(directory)
            .with_encoding(section.encoding)
            .with_sync_writes(section.sync_writes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = FolioConfig::default();
        assert_eq!(c.store.collection, "objects");
        assert_eq!(c.store.location, Location::Hidden);
        assert_eq!(c.store.encoding, Encoding::Json);
        assert!(c.store.directory.is_none());
        assert!(c.store.sync_writes);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(FolioConfig::from_toml_str("").unwrap(), FolioConfig::default());
    }

    #[test]
    fn parses_store_section() {
        let c = FolioConfig::from_toml_str(
            r#"
            [store]
            collection = "notes"
            location = "exposed"
            encoding = "bincode"
            sync_writes = false
            "#,
        )
        .unwrap();
        assert_eq!(c.store.collection, "notes");
        assert_eq!(c.store.location, Location::Exposed);
        assert_eq!(c.store.encoding, Encoding::Bincode);
        assert!(!c.store.sync_writes);
    }

    #[test]
    fn rejects_unknown_location() {
        let err = FolioConfig::from_toml_str("[store]\nlocation = \"cloud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn explicit_directory_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = FolioConfig::default();
        c.store.directory = Some(dir.path().join("notes"));
        c.store.encoding = Encoding::Bincode;

        let store = c.resolve_store().unwrap();
        assert_eq!(store.directory, dir.path().join("notes"));
        assert_eq!(store.encoding, Encoding::Bincode);
        // Resolution is pure.
        assert!(!store.directory.exists());
    }

    #[test]
    fn relative_directory_is_rejected() {
        let mut c = FolioConfig::default();
        c.store.directory = Some("relative/notes".into());
        assert!(matches!(
            c.resolve_store(),
            Err(ConfigError::RelativeDirectory(_))
        ));
    }

    #[test]
    fn escaping_collection_is_rejected() {
        let mut c = FolioConfig::default();
        c.store.collection = "../elsewhere".into();
        let err = c.resolve_store().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath(_)));
    }

    #[test]
    fn load_from_file_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        let mut c = FolioConfig::default();
        c.store.collection = "journal".into();
        fs::write(&path, toml::to_string_pretty(&c).unwrap()).unwrap();

        assert_eq!(FolioConfig::load(&path).unwrap(), c);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FolioConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
