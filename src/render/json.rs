//! JSON output.

use crate::error::{Result, TdsError};
use crate::ui::UserInterface;

use super::{RenderData, Renderer};

/// Renders all sections as one pretty-printed JSON object.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, data: &RenderData, ui: &mut dyn UserInterface) -> Result<()> {
        let text =
            serde_json::to_string_pretty(&data.to_json()).map_err(|e| TdsError::Other(e.into()))?;
        ui.output(&text);
        Ok(())
    }
}
