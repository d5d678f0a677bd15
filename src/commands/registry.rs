//! Handler registry.

use std::collections::HashMap;
use std::fmt;

use super::{exec_repository_list, Auth, Capability, CommandContext, CommandId, Config, Repository};
use crate::error::Result;

/// A handler that replaces convention lookup for one [`CommandId`].
pub type OverrideHandler = dyn Fn(&mut CommandContext<'_>) -> Result<()>;

/// Overrides plus capabilities, consulted in that order.
#[derive(Default)]
pub struct HandlerRegistry {
    overrides: HashMap<CommandId, Box<OverrideHandler>>,
    capabilities: HashMap<String, Box<dyn Capability>>,
}

impl HandlerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in handlers: the `repository list` override and the
    /// `Repository`, `Config` and `Auth` capabilities.
    pub fn standard() -> Self {
        Self::new()
            .with_override("repository", "list", exec_repository_list)
            .with_capability(Repository)
            .with_capability(Config)
            .with_capability(Auth)
    }

    /// Add an override, replacing any existing one for the same pair.
    pub fn with_override(
        mut self,
        command: &str,
        subcommand: &str,
        handler: impl Fn(&mut CommandContext<'_>) -> Result<()> + 'static,
    ) -> Self {
        self.overrides
            .insert(CommandId::new(command, subcommand), Box::new(handler));
        self
    }

    /// Add a capability under its own name.
    pub fn with_capability(mut self, capability: impl Capability + 'static) -> Self {
        self.capabilities
            .insert(capability.name().to_string(), Box::new(capability));
        self
    }

    /// The override registered for `id`.
    pub fn override_for(&self, id: &CommandId) -> Option<&OverrideHandler> {
        self.overrides.get(id).map(|handler| &**handler)
    }

    /// The capability registered as `name`.
    pub fn capability(&self, name: &str) -> Option<&dyn Capability> {
        self.capabilities.get(name).map(|capability| &**capability)
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut overrides: Vec<String> = self.overrides.keys().map(ToString::to_string).collect();
        overrides.sort();
        let mut capabilities: Vec<&str> = self.capabilities.keys().map(String::as_str).collect();
        capabilities.sort();
        f.debug_struct("HandlerRegistry")
            .field("overrides", &overrides)
            .field("capabilities", &capabilities)
            .finish()
    }
}
