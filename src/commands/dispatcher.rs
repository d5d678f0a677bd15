//! Command dispatching.

use super::{Capability, CommandContext, CommandId, HandlerRegistry, OverrideHandler};
use crate::error::Result;

/// Where a command was resolved to.
pub enum Resolution<'r> {
    /// An explicitly registered override.
    Override(&'r OverrideHandler),
    /// A capability operation found by naming convention.
    Convention {
        capability: &'r dyn Capability,
        operation: String,
    },
}

/// Routes commands to their handlers.
#[derive(Debug)]
pub struct CommandDispatcher<'r> {
    registry: &'r HandlerRegistry,
}

impl<'r> CommandDispatcher<'r> {
    /// Create a dispatcher over `registry`.
    pub fn new(registry: &'r HandlerRegistry) -> Self {
        Self { registry }
    }

    /// Find the handler for `id` without running it.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedCommand` if there is no override and no capability
    /// operation matching the naming convention.
    pub fn resolve(&self, id: &CommandId) -> Result<Resolution<'r>> {
        if let Some(handler) = self.registry.override_for(id) {
            return Ok(Resolution::Override(handler));
        }

        let name = id.capability_name();
        let operation = id.operation();
        let capability = self
            .registry
            .capability(&name)
            .ok_or_else(|| id.unresolved())?;
        if !capability.operations().contains(&operation.as_str()) {
            return Err(id.unresolved());
        }

        Ok(Resolution::Convention {
            capability,
            operation,
        })
    }

    /// Resolve the command named in the context parameters and run it.
    ///
    /// Errors raised by the handler are returned unchanged.
    pub fn dispatch(&self, ctx: &mut CommandContext<'_>) -> Result<()> {
        let id = CommandId::from_params(ctx.params)?;

        match self.resolve(&id)? {
            Resolution::Override(handler) => {
                tracing::debug!("Dispatching {} to override", id);
                handler(ctx)
            }
            Resolution::Convention {
                capability,
                operation,
            } => {
                tracing::debug!("Dispatching {} to {}::{}", id, capability.name(), operation);
                if let Some(data) = capability.invoke(&operation, ctx)? {
                    ctx.render(&data)?;
                }
                Ok(())
            }
        }
    }
}
