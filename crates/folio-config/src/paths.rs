//! Well-known base directories.
//!
//! These are environment queries only. They perform no I/O and never
//! create anything.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Which base directory a store lives under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Application-private data (`$XDG_DATA_HOME`, `~/Library/Application Support`,
    /// `%LOCALAPPDATA%`).
    #[default]
    Hidden,
    /// User-visible documents, falling back to the home directory.
    Exposed,
}

impl Location {
    /// The platform base directory for this location.
    pub fn base(&self) -> ConfigResult<PathBuf> {
        let base = match self {
            Self::Hidden => dirs::data_local_dir(),
            Self::Exposed => dirs::document_dir().or_else(dirs::home_dir),
        };
        base.ok_or(ConfigError::DirectoryUnavailable(*self))
    }

    /// The base directory joined with a relative `segment`.
    pub fn join(&self, segment: impl AsRef<Path>) -> ConfigResult<PathBuf> {
        let segment = segment.as_ref();
        ensure_relative(segment)?;
        Ok(self.base()?.join(segment))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => write!(f, "hidden"),
            Self::Exposed => write!(f, "exposed"),
        }
    }
}

/// `segment` under the application-private data directory.
pub fn hidden_directory(segment: impl AsRef<Path>) -> ConfigResult<PathBuf> {
    Location::Hidden.join(segment)
}

/// `segment` under the user-visible documents directory.
pub fn exposed_directory(segment: impl AsRef<Path>) -> ConfigResult<PathBuf> {
    Location::Exposed.join(segment)
}

/// Reject paths that are absolute or climb out of their base.
pub(crate) fn ensure_relative(path: &Path) -> ConfigResult<()> {
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidPath(path.display().to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_join_segment_or_report_unavailable() {
        for (location, result) in [
            (Location::Hidden, hidden_directory("folio/notes")),
            (Location::Exposed, exposed_directory("folio/notes")),
        ] {
            match result {
                Ok(path) => {
                    assert!(path.ends_with("folio/notes"));
                    assert!(path.starts_with(location.base().unwrap()));
                }
                Err(e) => assert!(matches!(e, ConfigError::DirectoryUnavailable(l) if l == location)),
            }
        }
    }

    #[test]
    fn rejects_absolute_and_parent_segments() {
        for bad in ["/etc", "../outside", "a/../../b", ""] {
            let err = ensure_relative(Path::new(bad)).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidPath(_)), "{bad}");
        }
        assert!(ensure_relative(Path::new("./notes/2024")).is_ok());
    }

    #[test]
    fn location_names() {
        assert_eq!(Location::Hidden.to_string(), "hidden");
        assert_eq!(Location::Exposed.to_string(), "exposed");
        assert_eq!(Location::default(), Location::Hidden);
    }
}
