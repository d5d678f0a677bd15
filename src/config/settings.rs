//! Loaded configuration with dotted-key access.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::{Result, TdsError};

/// One parsed configuration file.
///
/// Keys are dotted paths into nested mappings: `db.hostname` reads
/// `hostname` under `db`. A top-level key that literally contains dots
/// takes precedence over the nested lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    source: PathBuf,
    root: Value,
}

impl Settings {
    /// Wrap an already-parsed YAML document.
    pub fn from_value(source: impl Into<PathBuf>, root: Value) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }

    /// Parse YAML content.
    ///
    /// # Arguments
    ///
    /// * `content` - The YAML content to parse
    /// * `source` - Path for error reporting
    pub fn parse(content: &str, source: &Path) -> Result<Self> {
        let root: Value =
            serde_yaml::from_str(content).map_err(|e| TdsError::ConfigParseError {
                path: source.to_path_buf(),
                message: e.to_string(),
            })?;

        if !matches!(root, Value::Mapping(_) | Value::Null) {
            return Err(TdsError::ConfigParseError {
                path: source.to_path_buf(),
                message: "top level must be a mapping".to_string(),
            });
        }

        Ok(Self::from_value(source, root))
    }

    /// File this configuration was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Look up a dotted key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.root.get(key) {
            return Some(value);
        }

        key.split('.')
            .try_fold(&self.root, |node, part| node.get(part))
    }

    /// Look up a dotted key holding a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Look up a required key.
    ///
    /// # Errors
    ///
    /// Returns `MissingConfigKey` if the key is absent or null.
    pub fn require(&self, key: &str) -> Result<&Value> {
        match self.get(key) {
            Some(Value::Null) | None => Err(TdsError::MissingConfigKey {
                key: key.to_string(),
                path: self.source.clone(),
            }),
            Some(value) => Ok(value),
        }
    }

    /// Look up a required scalar and render it as a string.
    ///
    /// Numbers and booleans are accepted so an all-digit password does not
    /// need quoting in YAML.
    pub fn require_string(&self, key: &str) -> Result<String> {
        match self.require(key)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            _ => Err(TdsError::ConfigValidationError {
                message: format!(
                    "'{}' in {} must be a string",
                    key,
                    self.source.display()
                ),
            }),
        }
    }
}
