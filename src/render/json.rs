//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the Document model directly, keeping the `module.functions`
//! shape of the source format (`type` / `return` field names).

use crate::model::Document;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Document) -> String {
        // Plain string fields only; serialization cannot fail.
        let mut out = serde_json::to_string_pretty(doc).unwrap_or_default();
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
