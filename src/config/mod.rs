//! Configuration and credential loading for TDS.
//!
//! This module handles all aspects of configuration:
//! - File discovery and parsing in [`loader`]
//! - Dotted-key access in [`settings`]
//! - Load-once cells in [`memo`]
//! - The lazily loaded stores in [`store`]
//!
//! # Example
//!
//! ```
//! use tds::config::{ConfigPaths, ConfigStore};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("deploy.yml"), "env:\n  environment: staging\n").unwrap();
//!
//! let store = ConfigStore::from_paths(ConfigPaths::new(temp.path()));
//! let settings = store.get().unwrap();
//! assert_eq!(settings.get_str("env.environment"), Some("staging"));
//! assert!(std::ptr::eq(settings, store.get().unwrap()));
//! ```
//!
//! # Configuration File Locations
//!
//! Everything is read from one directory, `--config-dir`, `TDS_CONFIG_DIR`
//! or `/etc/tagops` in that order:
//! 1. `deploy.yml` - application settings
//! 2. `dbaccess.<level>.yml` - database credentials per access level

pub mod loader;
pub mod memo;
pub mod settings;
pub mod store;

pub use loader::{load_settings, ConfigPaths, DEFAULT_CONFIG_DIR, DEPLOY_CONFIG_FILE};
pub use memo::Memoized;
pub use settings::Settings;
pub use store::{ConfigStore, CredentialStore, Credentials};
