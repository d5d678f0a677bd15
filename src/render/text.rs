//! Human-readable output.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::ui::{Table, UserInterface};

use super::{RenderData, Renderer};

/// Renders lists of records as tables and everything else as `key: value`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, data: &RenderData, ui: &mut dyn UserInterface) -> Result<()> {
        for (name, value) in data.sections() {
            match value {
                Value::Array(items) if items.is_empty() => {
                    ui.output(&format!("No {} found", name));
                }
                Value::Array(items) if items.iter().all(Value::is_object) => {
                    ui.output(&record_table(items).render());
                }
                Value::Array(items) => {
                    let joined: Vec<String> = items.iter().map(scalar).collect();
                    ui.output(&format!("{}: {}", name, joined.join(", ")));
                }
                Value::Object(fields) => {
                    ui.output(&format!("{}:", name));
                    for (key, field) in fields {
                        ui.output(&format!("  {}: {}", key, scalar(field)));
                    }
                }
                other => ui.output(&format!("{}: {}", name, scalar(other))),
            }
        }
        Ok(())
    }
}

/// Columns come from the keys of every record, first seen first.
fn record_table(records: &[Value]) -> Table {
    let mut columns: Vec<&str> = Vec::new();
    for fields in records.iter().filter_map(Value::as_object) {
        for key in fields.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    let mut table = Table::new(columns.iter().copied());
    let empty = Map::new();
    for record in records {
        let fields = record.as_object().unwrap_or(&empty);
        table.add_row(
            columns
                .iter()
                .map(|c| fields.get(*c).map(scalar).unwrap_or_default()),
        );
    }
    table
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
