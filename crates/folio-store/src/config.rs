use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::Encoding;

/// Construction parameters for a [`Publisher`](crate::Publisher).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one file per stored value.
    pub directory: PathBuf,
    /// Byte encoding shared by every file in the directory.
    #[serde(default)]
    pub encoding: Encoding,
    /// `fsync` each temp file before it is persisted into place.
    #[serde(default = "default_sync_writes")]
    pub sync_writes: bool,
}

fn default_sync_writes() -> bool {
    true
}

impl StoreConfig {
    /// Config for `directory` with default encoding and sync policy.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            encoding: Encoding::default(),
            sync_writes: default_sync_writes(),
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = StoreConfig::new("/tmp/notes");
        assert_eq!(c.directory, PathBuf::from("/tmp/notes"));
        assert_eq!(c.encoding, Encoding::Json);
        assert!(c.sync_writes);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c: StoreConfig = serde_json::from_str(r#"{"directory": "/data"}"#).unwrap();
        assert_eq!(c, StoreConfig::new("/data"));
    }

    #[test]
    fn builders_override() {
        let c = StoreConfig::new("/data")
            .with_encoding(Encoding::Bincode)
            .with_sync_writes(false);
        assert_eq!(c.encoding, Encoding::Bincode);
        assert!(!c.sync_writes);
    }
}
