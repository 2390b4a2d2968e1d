//! Configuration for Folio applications.
//!
//! Values are resolved once at startup and passed in explicitly:
//!
//! - [`paths`] -- platform base directories (hidden and user-visible)
//! - [`FolioConfig`] -- TOML file that resolves a [`StoreConfig`](folio_store::StoreConfig)
//! - [`ResourceLoader`] / [`BundleDir`] -- read-only bundled assets
//! - [`Preferences`] / [`Preference`] -- persistent user preferences with defaults

pub mod config;
pub mod error;
pub mod paths;
pub mod preferences;
pub mod resource;

pub use config::{FolioConfig, StoreSection};
pub use error::{ConfigError, ConfigResult};
pub use paths::{exposed_directory, hidden_directory, Location};
pub use preferences::{Preference, Preferences};
pub use resource::{decode_resource, BundleDir, ResourceLoader};
