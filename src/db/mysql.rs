//! MySQL backend.

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Row;
use tokio::runtime::{Builder, Runtime};

use super::{ConnectionDescriptor, Connector, Database, Project};
use crate::error::Result;

const DEFAULT_PORT: u16 = 3306;

/// Opens [`MySqlSession`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlConnector;

impl Connector for MySqlConnector {
    fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<Box<dyn Database>> {
        Ok(Box::new(MySqlSession::open(descriptor)?))
    }
}

/// A single-connection pool plus the runtime that drives it.
///
/// Calls block the current thread until the query finishes.
pub struct MySqlSession {
    runtime: Runtime,
    pool: MySqlPool,
}

impl MySqlSession {
    /// Connect and verify the credentials.
    ///
    /// # Errors
    ///
    /// Returns `Database` if the host is unreachable or the credentials are
    /// rejected.
    pub fn open(descriptor: &ConnectionDescriptor) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let options = connect_options(descriptor);

        let pool = runtime.block_on(
            MySqlPoolOptions::new()
                .max_connections(1)
                .max_lifetime(descriptor.recycle)
                .connect_with(options),
        )?;

        Ok(Self { runtime, pool })
    }
}

fn connect_options(descriptor: &ConnectionDescriptor) -> MySqlConnectOptions {
    let (host, port) = match descriptor.host.rsplit_once(':') {
        Some((host, port)) => match port.parse::<u16>() {
            Ok(port) => (host, port),
            Err(_) => (descriptor.host.as_str(), DEFAULT_PORT),
        },
        None => (descriptor.host.as_str(), DEFAULT_PORT),
    };

    MySqlConnectOptions::new()
        .host(host)
        .port(port)
        .username(&descriptor.username)
        .password(&descriptor.password)
        .database(&descriptor.database)
}

impl Database for MySqlSession {
    fn list_projects(&self, names: &[String]) -> Result<Vec<Project>> {
        let rows = self.runtime.block_on(
            sqlx::query("SELECT project_id, name FROM projects ORDER BY name").fetch_all(&self.pool),
        )?;

        let mut projects = Vec::with_capacity(rows.len());
        for row in rows {
            let project = Project {
                id: row.try_get("project_id")?,
                name: row.try_get("name")?,
            };
            if names.is_empty() || names.contains(&project.name) {
                projects.push(project);
            }
        }

        tracing::trace!("Fetched {} projects", projects.len());
        Ok(projects)
    }
}
