//! Lazily loaded application configuration and database credentials.

use std::fmt;

use crate::auth::AccessLevel;
use crate::config::loader::{load_settings, ConfigPaths};
use crate::config::memo::Memoized;
use crate::config::settings::Settings;
use crate::error::Result;

type SettingsLoader = Box<dyn Fn() -> Result<Settings> + Send + Sync>;
type CredentialLoader = Box<dyn Fn(AccessLevel) -> Result<Credentials> + Send + Sync>;

/// Application configuration, loaded on first [`get`](Self::get).
pub struct ConfigStore {
    loader: SettingsLoader,
    settings: Memoized<Settings>,
}

impl ConfigStore {
    /// Create a store backed by a custom loader.
    pub fn new(loader: impl Fn() -> Result<Settings> + Send + Sync + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            settings: Memoized::new(),
        }
    }

    /// Create a store that reads `deploy.yml` from the configuration directory.
    pub fn from_paths(paths: ConfigPaths) -> Self {
        Self::new(move || load_settings(&paths.deploy()))
    }

    /// The configuration, loading it on the first call.
    ///
    /// Later calls return the same instance without touching the loader.
    pub fn get(&self) -> Result<&Settings> {
        self.settings.get_or_try_load(|| {
            tracing::debug!("Loading application configuration");
            (self.loader)()
        })
    }

    /// Whether the configuration has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.settings.is_loaded()
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Database connection credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// `db.user`
    pub user: String,
    /// `db.password`
    pub password: String,
    /// `db.hostname`
    pub hostname: String,
    /// `db.db_name`
    pub db_name: String,
}

impl Credentials {
    /// Extract the `db.*` keys from a credentials file.
    ///
    /// # Errors
    ///
    /// Returns `MissingConfigKey` naming the first absent key.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            user: settings.require_string("db.user")?,
            password: settings.require_string("db.password")?,
            hostname: settings.require_string("db.hostname")?,
            db_name: settings.require_string("db.db_name")?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"********")
            .field("hostname", &self.hostname)
            .field("db_name", &self.db_name)
            .finish()
    }
}

/// Database credentials, loaded on first [`get`](Self::get).
pub struct CredentialStore {
    loader: CredentialLoader,
    credentials: Memoized<Credentials>,
}

impl CredentialStore {
    /// Profile used when the caller has no resolved access level.
    pub const DEFAULT_PROFILE: AccessLevel = AccessLevel::Dev;

    /// Create a store backed by a custom loader.
    pub fn new(loader: impl Fn(AccessLevel) -> Result<Credentials> + Send + Sync + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            credentials: Memoized::new(),
        }
    }

    /// Create a store that reads `dbaccess.<profile>.yml` from the
    /// configuration directory.
    pub fn from_paths(paths: ConfigPaths) -> Self {
        Self::new(move |profile| {
            let settings = load_settings(&paths.dbaccess(profile))?;
            Credentials::from_settings(&settings)
        })
    }

    /// The credentials, loading them for `profile` on the first call.
    ///
    /// `profile` only matters for the first call; later calls return the
    /// already loaded instance whatever profile they pass.
    pub fn get(&self, profile: AccessLevel) -> Result<&Credentials> {
        self.credentials.get_or_try_load(|| {
            tracing::debug!("Loading database credentials for profile {}", profile);
            (self.loader)(profile)
        })
    }

    /// Whether the credentials have been loaded.
    pub fn is_loaded(&self) -> bool {
        self.credentials.is_loaded()
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
