//! One TDS invocation, start to finish.
//!
//! [`Application::run`] performs the stages in a fixed order and stops at
//! the first failure:
//!
//! 1. check the targeting options and set `explicit`
//! 2. identify the operator and resolve their access level
//! 3. copy `environment` and `repo` from the deploy configuration
//! 4. open the database session
//! 5. dispatch the command

use crate::auth::{Authorizer, LocalActor};
use crate::bootstrap::SessionBootstrapper;
use crate::commands::{CommandContext, CommandDispatcher, HandlerRegistry};
use crate::config::{ConfigPaths, ConfigStore, CredentialStore};
use crate::db::{Connector, MySqlConnector};
use crate::error::{Result, TdsError};
use crate::params::ParameterBag;
use crate::render::Renderer;
use crate::ui::UserInterface;
use crate::validate::validate;

/// The orchestrator for a single invocation.
pub struct Application {
    params: ParameterBag,
    config: ConfigStore,
    credentials: CredentialStore,
    authorizer: Authorizer,
    actor: Option<LocalActor>,
    registry: HandlerRegistry,
    connector: Box<dyn Connector>,
    bootstrapper: SessionBootstrapper,
}

impl Application {
    /// Create an application reading configuration from `paths`, with the
    /// built-in handlers and the MySQL backend. The operator is read from
    /// the OS when the invocation reaches authorization.
    pub fn new(paths: ConfigPaths) -> Self {
        let mut params = ParameterBag::new();
        params.replace("deployment", true);

        Self {
            params,
            config: ConfigStore::from_paths(paths.clone()),
            credentials: CredentialStore::from_paths(paths),
            authorizer: Authorizer::default(),
            actor: None,
            registry: HandlerRegistry::standard(),
            connector: Box::new(MySqlConnector),
            bootstrapper: SessionBootstrapper::new(),
        }
    }

    /// Act as `actor` instead of the current OS user.
    pub fn with_actor(mut self, actor: LocalActor) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Replace the handler registry.
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the database connector.
    pub fn with_connector(mut self, connector: impl Connector + 'static) -> Self {
        self.connector = Box::new(connector);
        self
    }

    /// Replace the group-to-level mapping.
    pub fn with_authorizer(mut self, authorizer: Authorizer) -> Self {
        self.authorizer = authorizer;
        self
    }

    /// Replace the deploy configuration store.
    pub fn with_config(mut self, config: ConfigStore) -> Self {
        self.config = config;
        self
    }

    /// Replace the credential store.
    pub fn with_credentials(mut self, credentials: CredentialStore) -> Self {
        self.credentials = credentials;
        self
    }

    /// The parameters accumulated so far.
    pub fn params(&self) -> &ParameterBag {
        &self.params
    }

    /// Run the invocation described by `args`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any stage. Handler errors are
    /// returned unchanged.
    pub fn run(
        &mut self,
        args: ParameterBag,
        ui: &mut dyn UserInterface,
        renderer: &dyn Renderer,
    ) -> Result<()> {
        for (key, value) in args.iter() {
            self.params.insert(key, value.clone())?;
        }

        validate(&mut self.params)?;

        self.update_program_parameters()?;

        tracing::debug!("Connecting to the database");
        let profile = self
            .params
            .get_str("user_level")
            .and_then(|l| l.parse().ok())
            .unwrap_or(CredentialStore::DEFAULT_PROFILE);
        let session = self.bootstrapper.open_session(
            &self.params,
            &self.credentials,
            profile,
            ui,
            self.connector.as_ref(),
        )?;

        tracing::debug!("Running the requested command");
        let mut ctx = CommandContext {
            params: &mut self.params,
            session: &session,
            ui,
            renderer,
        };
        CommandDispatcher::new(&self.registry).dispatch(&mut ctx)
    }

    fn update_program_parameters(&mut self) -> Result<()> {
        let actor = match &self.actor {
            Some(actor) => actor.clone(),
            None => LocalActor::current()?,
        };
        self.params.replace("user", actor.name.as_str());
        tracing::trace!("User is: {}", actor.name);

        tracing::debug!("Checking user authorization level");
        let level = self
            .authorizer
            .resolve_level(&actor)
            .ok_or_else(|| TdsError::AccessDenied {
                account: actor.name.clone(),
            })?;
        self.params.replace("user_level", level.as_str());
        tracing::trace!("User level is: {}", level);

        let settings = self.config.get()?;
        let environment = settings.require("env.environment")?.clone();
        let repo = settings.require("repo")?.clone();
        tracing::trace!("Environment is: {:?}", environment);
        self.params.replace("environment", environment);
        self.params.replace("repo", repo);

        Ok(())
    }
}
