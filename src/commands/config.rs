//! `config` commands.

use serde_json::Value;

use crate::error::{Result, TdsError};
use crate::render::RenderData;

use super::{Capability, CommandContext, CommandId};

/// Shows the configuration the invocation resolved.
#[derive(Debug, Default, Clone, Copy)]
pub struct Config;

impl Capability for Config {
    fn name(&self) -> &'static str {
        "Config"
    }

    fn operations(&self) -> &'static [&'static str] {
        &["show"]
    }

    fn invoke(&self, operation: &str, ctx: &mut CommandContext<'_>) -> Result<Option<RenderData>> {
        if operation != "show" {
            return Err(CommandId::new("config", operation).unresolved());
        }

        let mut data = RenderData::new();
        for key in ["environment", "repo"] {
            let value = match ctx.params.get(key) {
                Some(value) => serde_json::to_value(value).map_err(|e| TdsError::Other(e.into()))?,
                None => Value::Null,
            };
            data.push(key, value);
        }
        data.push("database", Value::from(ctx.session.database()));
        data.push("host", Value::from(ctx.session.host()));
        Ok(Some(data))
    }
}
