//! Database session bootstrap.
//!
//! Chooses where the database username and password come from, then opens
//! the single session the rest of the invocation uses.

use crate::auth::AccessLevel;
use crate::config::CredentialStore;
use crate::db::{ConnectionDescriptor, Connector, Session, RECYCLE_INTERVAL};
use crate::error::{Result, TdsError};
use crate::params::ParameterBag;
use crate::ui::{Prompt, UserInterface};

/// Prompt key for the interactive database password.
pub const PASSWORD_PROMPT_KEY: &str = "db_password";

/// Opens the database session at most once.
#[derive(Debug, Default)]
pub struct SessionBootstrapper {
    opened: bool,
}

impl SessionBootstrapper {
    /// Create a bootstrapper that has not opened a session yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session has been opened.
    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Build the connection descriptor and connect.
    ///
    /// A non-empty `dbuser` parameter selects that account and asks for its
    /// password on the terminal. Otherwise the configured account is used.
    /// Host and database name always come from the credentials file.
    ///
    /// # Errors
    ///
    /// Returns `SessionAlreadyOpen` on a second call, a configuration error
    /// if the credentials cannot be loaded, or the connector's error.
    pub fn open_session(
        &mut self,
        params: &ParameterBag,
        credentials: &CredentialStore,
        profile: AccessLevel,
        ui: &mut dyn UserInterface,
        connector: &dyn Connector,
    ) -> Result<Session> {
        if self.opened {
            return Err(TdsError::SessionAlreadyOpen);
        }

        let descriptor = build_descriptor(params, credentials, profile, ui)?;
        tracing::debug!(
            "Opening session as {} on {}/{}",
            descriptor.username,
            descriptor.host,
            descriptor.database
        );
        if ui.output_mode().shows_details() {
            ui.message(&format!(
                "Database: {}@{}/{}",
                descriptor.username, descriptor.host, descriptor.database
            ));
        }

        let mut spinner = ui.start_spinner("Connecting to the database");
        let backend = match connector.connect(&descriptor) {
            Ok(backend) => {
                spinner.finish_success("Connected");
                backend
            }
            Err(e) => {
                spinner.finish_error("Connection failed");
                return Err(e);
            }
        };

        self.opened = true;
        Ok(Session::new(backend, &descriptor))
    }
}

/// Resolve the connection descriptor without connecting.
pub fn build_descriptor(
    params: &ParameterBag,
    credentials: &CredentialStore,
    profile: AccessLevel,
    ui: &mut dyn UserInterface,
) -> Result<ConnectionDescriptor> {
    let creds = credentials.get(profile)?;

    let (username, password) = match params.get_str("dbuser").filter(|u| !u.is_empty()) {
        Some(dbuser) => {
            tracing::trace!("Using operator-supplied database account {}", dbuser);
            let password = ui.prompt(&Prompt::secret(PASSWORD_PROMPT_KEY, "Enter DB password"))?;
            (dbuser.to_string(), password)
        }
        None => (creds.user.clone(), creds.password.clone()),
    };

    Ok(ConnectionDescriptor {
        username,
        password,
        host: creds.hostname.clone(),
        database: creds.db_name.clone(),
        recycle: RECYCLE_INTERVAL,
    })
}
