//! Database session.
//!
//! The process talks to one database through one [`Session`], opened by the
//! [`SessionBootstrapper`](crate::bootstrap::SessionBootstrapper) and passed
//! by reference to whatever needs it. Backends implement [`Database`];
//! [`Connector`] turns a [`ConnectionDescriptor`] into a backend.

pub mod mysql;

pub use mysql::{MySqlConnector, MySqlSession};

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::error::Result;

/// How long a pooled connection lives before it is replaced.
pub const RECYCLE_INTERVAL: Duration = Duration::from_secs(3600);

/// Everything needed to open a session.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub username: String,
    pub password: String,
    /// Host name, optionally with `:port`.
    pub host: String,
    pub database: String,
    /// Maximum connection lifetime.
    pub recycle: Duration,
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("username", &self.username)
            .field("password", &"********")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("recycle", &self.recycle)
            .finish()
    }
}

/// A deployable project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

/// Queries the dispatch layer needs from the database.
pub trait Database {
    /// Projects named in `names`, or every project when `names` is empty.
    /// Results are ordered by name.
    fn list_projects(&self, names: &[String]) -> Result<Vec<Project>>;
}

/// Opens database backends.
pub trait Connector {
    /// Connect using `descriptor`. Called at most once per process.
    fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<Box<dyn Database>>;
}

/// The process-wide database session.
pub struct Session {
    backend: Box<dyn Database>,
    username: String,
    host: String,
    database: String,
}

impl Session {
    /// Wrap an opened backend.
    pub fn new(backend: Box<dyn Database>, descriptor: &ConnectionDescriptor) -> Self {
        Self {
            backend,
            username: descriptor.username.clone(),
            host: descriptor.host.clone(),
            database: descriptor.database.clone(),
        }
    }

    /// The backend to query.
    pub fn db(&self) -> &dyn Database {
        self.backend.as_ref()
    }

    /// Account the session is connected as.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Database host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("host", &self.host)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}
