//! Command dispatch.
//!
//! This module provides:
//! - [`CommandId`], the `(command, subcommand)` pair taken from the parameters
//! - [`Capability`] trait for handlers found by naming convention
//! - [`HandlerRegistry`] holding overrides and capabilities
//! - [`CommandDispatcher`] for routing a command to its handler
//!
//! An override registered for a [`CommandId`] always wins. Otherwise the
//! command name, capitalized, selects a capability and the subcommand, with
//! `-` replaced by `_`, selects the operation on it.

pub mod auth;
pub mod config;
pub mod dispatcher;
pub mod registry;
pub mod repository;

pub use auth::Auth;
pub use config::Config;
pub use dispatcher::{CommandDispatcher, Resolution};
pub use registry::{HandlerRegistry, OverrideHandler};
pub use repository::{exec_repository_list, Repository};

use std::fmt;

use crate::auth::AccessLevel;
use crate::db::Session;
use crate::error::{Result, TdsError};
use crate::params::ParameterBag;
use crate::render::{RenderData, Renderer};
use crate::ui::UserInterface;

/// A `(command, subcommand)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandId {
    command: String,
    subcommand: String,
}

impl CommandId {
    /// Create an identifier. Names are matched case-insensitively.
    pub fn new(command: &str, subcommand: &str) -> Self {
        Self {
            command: command.to_lowercase(),
            subcommand: subcommand.to_lowercase(),
        }
    }

    /// Read `command_name` and `subcommand_name` from the parameters.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either is missing.
    pub fn from_params(params: &ParameterBag) -> Result<Self> {
        let command = params.get_str("command_name").ok_or_else(|| missing("command_name"))?;
        let subcommand = params
            .get_str("subcommand_name")
            .ok_or_else(|| missing("subcommand_name"))?;
        Ok(Self::new(command, subcommand))
    }

    /// The command name.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The subcommand name.
    pub fn subcommand(&self) -> &str {
        &self.subcommand
    }

    /// Capability name: the command with its first letter capitalized.
    pub fn capability_name(&self) -> String {
        let mut chars = self.command.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Operation name: the subcommand with `-` replaced by `_`.
    pub fn operation(&self) -> String {
        self.subcommand.replace('-', "_")
    }

    pub(crate) fn unresolved(&self) -> TdsError {
        TdsError::UnresolvedCommand {
            command: self.command.clone(),
            subcommand: self.subcommand.clone(),
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.command, self.subcommand)
    }
}

fn missing(key: &str) -> TdsError {
    TdsError::ConfigValidationError {
        message: format!("parameter '{}' is required", key),
    }
}

/// Everything a handler may touch.
pub struct CommandContext<'a> {
    pub params: &'a mut ParameterBag,
    pub session: &'a Session,
    pub ui: &'a mut dyn UserInterface,
    pub renderer: &'a dyn Renderer,
}

impl CommandContext<'_> {
    /// The operator's account name.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `user` has not been set, which
    /// happens only when a handler runs outside [`crate::app::Application`].
    pub fn account(&self) -> Result<&str> {
        self.params.get_str("user").ok_or_else(|| missing("user"))
    }

    /// The operator's resolved access level.
    pub fn user_level(&self) -> Option<AccessLevel> {
        self.params.get_str("user_level").and_then(|l| l.parse().ok())
    }

    /// Hand `data` to the renderer.
    pub fn render(&mut self, data: &RenderData) -> Result<()> {
        self.renderer.render(data, &mut *self.ui)
    }
}

/// A named group of operations found by convention.
pub trait Capability {
    /// Registered name, e.g. `Repository`.
    fn name(&self) -> &'static str;

    /// Operations this capability answers to.
    fn operations(&self) -> &'static [&'static str];

    /// Run `operation`. A returned [`RenderData`] is passed to the renderer.
    fn invoke(&self, operation: &str, ctx: &mut CommandContext<'_>) -> Result<Option<RenderData>>;
}
