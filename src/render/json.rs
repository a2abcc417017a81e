//! JSON serialization of the output models.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Layout, StructuredDocument};

/// Output formatting for JSON renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Human-readable, indented
    Pretty,
    /// Single line, no extra whitespace
    #[default]
    Compact,
}

/// Serialize the layout model to JSON.
pub fn to_layout_json(layout: &Layout, format: JsonFormat) -> Result<String> {
    serialize(layout, format)
}

/// Serialize the structured document to JSON.
pub fn to_structured_json(document: &StructuredDocument, format: JsonFormat) -> Result<String> {
    serialize(document, format)
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let out = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };
    out.map_err(|e| Error::Render(format!("JSON serialization failed: {}", e)))
}
