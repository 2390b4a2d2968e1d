use std::path::PathBuf;

use crate::paths::Location;

/// Errors from configuration, resource and preference operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform exposes no such base directory.
    #[error("no {0} base directory is available on this platform")]
    DirectoryUnavailable(Location),

    /// No bundled resource exists for the key.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// A key or path segment is absolute or escapes its base with `..`.
    #[error("invalid relative path: {0:?}")]
    InvalidPath(String),

    /// A configured store directory is not absolute.
    #[error("store directory must be absolute: {}", .0.display())]
    RelativeDirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML or JSON contents could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
