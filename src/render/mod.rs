//! Result rendering.
//!
//! Handlers hand back a [`RenderData`], an ordered list of named sections.
//! A [`Renderer`] turns it into command output on the [`UserInterface`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tds::render::{create_renderer, OutputFormat, RenderData};
//! use tds::ui::MockUI;
//!
//! let data = RenderData::new().section("environment", json!("staging"));
//! let mut ui = MockUI::new();
//! create_renderer(OutputFormat::Text).render(&data, &mut ui).unwrap();
//! assert!(ui.has_output("environment: staging"));
//! ```

pub mod json;
pub mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, TdsError};
use crate::ui::UserInterface;

/// Ordered, named result sections produced by a handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderData {
    sections: Vec<(String, Value)>,
}

impl RenderData {
    /// Create empty render data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section.
    pub fn section(mut self, name: impl Into<String>, value: Value) -> Self {
        self.push(name, value);
        self
    }

    /// Append a section built from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be represented as JSON.
    pub fn serialized(self, name: impl Into<String>, value: &impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(value).map_err(|e| TdsError::Other(e.into()))?;
        Ok(self.section(name, value))
    }

    /// Append a section in place. A section with the same name is replaced.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.sections.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.sections.push((name, value)),
        }
    }

    /// Look up a section by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.sections.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Sections in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.sections.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// All sections as one JSON object, keys in insertion order.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self.sections.iter().cloned().collect();
        Value::Object(map)
    }
}

/// Writes [`RenderData`] as command output.
pub trait Renderer {
    /// Render `data` to `ui`.
    fn render(&self, data: &RenderData, ui: &mut dyn UserInterface) -> Result<()>;
}

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tables and `key: value` lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Create the renderer for `format`.
pub fn create_renderer(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
