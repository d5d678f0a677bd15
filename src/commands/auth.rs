//! `auth` commands.

use serde_json::Value;

use crate::error::Result;
use crate::render::RenderData;

use super::{Capability, CommandContext, CommandId};

/// Reports who the operator is and what they may do.
#[derive(Debug, Default, Clone, Copy)]
pub struct Auth;

impl Capability for Auth {
    fn name(&self) -> &'static str {
        "Auth"
    }

    fn operations(&self) -> &'static [&'static str] {
        &["show_level"]
    }

    fn invoke(&self, operation: &str, ctx: &mut CommandContext<'_>) -> Result<Option<RenderData>> {
        if operation != "show_level" {
            return Err(CommandId::new("auth", operation).unresolved());
        }

        let level = ctx.user_level().map_or(Value::Null, |l| Value::from(l.as_str()));
        let data = RenderData::new()
            .section("user", Value::from(ctx.account()?))
            .section("user_level", level)
            .section("explicit", Value::from(ctx.params.get_bool("explicit").unwrap_or(false)));
        Ok(Some(data))
    }
}
