//! Configuration file discovery and loading.
//!
//! All configuration lives in one directory:
//!
//! - `deploy.yml` - application settings (`env.environment`, `repo`, ...)
//! - `dbaccess.<level>.yml` - database credentials for one access level

use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::AccessLevel;
use crate::config::settings::Settings;
use crate::error::{Result, TdsError};

/// Directory used when neither `--config-dir` nor `TDS_CONFIG_DIR` is set.
pub const DEFAULT_CONFIG_DIR: &str = "/etc/tagops";

/// File name of the application configuration.
pub const DEPLOY_CONFIG_FILE: &str = "deploy.yml";

/// Locations of the configuration files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    dir: PathBuf,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_DIR)
    }
}

impl ConfigPaths {
    /// Use the given configuration directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Use `dir` if given, otherwise the default directory.
    pub fn discover(dir: Option<&Path>) -> Self {
        dir.map(Self::new).unwrap_or_default()
    }

    /// The configuration directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the application configuration.
    pub fn deploy(&self) -> PathBuf {
        self.dir.join(DEPLOY_CONFIG_FILE)
    }

    /// Path of the credentials file for an access level.
    pub fn dbaccess(&self, profile: AccessLevel) -> PathBuf {
        self.dir.join(format!("dbaccess.{}.yml", profile))
    }
}

/// Load and parse a single YAML configuration file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigReadError` if it exists but cannot be read.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_settings(path: &Path) -> Result<Settings> {
    tracing::debug!("Loading configuration from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TdsError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            TdsError::ConfigReadError {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    Settings::parse(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_paths_use_etc_tagops() {
        let paths = ConfigPaths::default();
        assert_eq!(paths.dir(), Path::new("/etc/tagops"));
        assert_eq!(paths.deploy(), PathBuf::from("/etc/tagops/deploy.yml"));
    }

    #[test]
    fn discover_prefers_explicit_dir() {
        let paths = ConfigPaths::discover(Some(Path::new("/opt/tds")));
        assert_eq!(paths.dir(), Path::new("/opt/tds"));
        assert_eq!(ConfigPaths::discover(None), ConfigPaths::default());
    }

    #[test]
    fn dbaccess_path_includes_level() {
        let paths = ConfigPaths::new("/cfg");
        assert_eq!(
            paths.dbaccess(AccessLevel::Dev),
            PathBuf::from("/cfg/dbaccess.dev.yml")
        );
        assert_eq!(
            paths.dbaccess(AccessLevel::Admin),
            PathBuf::from("/cfg/dbaccess.admin.yml")
        );
    }

    #[test]
    fn load_settings_parses_valid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deploy.yml");
        fs::write(&path, "env:\n  environment: staging\n").unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.get_str("env.environment"), Some("staging"));
        assert_eq!(settings.source(), path.as_path());
    }

    #[test]
    fn load_settings_returns_not_found_error() {
        let result = load_settings(Path::new("/nonexistent/deploy.yml"));
        assert!(matches!(result, Err(TdsError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_settings_unreadable_file_is_a_configuration_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deploy.yml");
        fs::create_dir(&path).unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, TdsError::ConfigReadError { .. }));
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
        assert!(err.to_string().contains("deploy.yml"));
    }

    #[test]
    fn load_settings_returns_parse_error_for_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deploy.yml");
        fs::write(&path, "invalid: yaml: content: [").unwrap();

        let result = load_settings(&path);
        assert!(matches!(result, Err(TdsError::ConfigParseError { .. })));
    }
}
