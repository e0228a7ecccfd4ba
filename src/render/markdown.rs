//! Markdown renderer. Writes the Markdown-flavored `.ndoc` dialect.
//!
//! The output normalizes back to canonical markup, so converting a file to
//! Markdown and loading it again yields the same Document. Descriptions
//! that would otherwise read as a heading, list item or directive are
//! written behind a `\\`.

use crate::model::*;
use crate::parser::markdown::{is_canonical, ESCAPE};
use crate::render::Renderer;

/// Leading characters the dialect gives a meaning to.
const MARKUP_STARTS: &[char] = &['#', '-', '*', '[', ESCAPE];

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &Document) -> String {
        let module = &doc.module;
        let mut out = String::new();

        if !module.name.is_empty() {
            out.push_str(&format!("# {}\n\n", module.name));
        }
        if !module.desc.is_empty() {
            out.push_str(&prose(&module.desc));
            out.push_str("\n\n");
        }

        for func in &module.functions {
            out.push_str(&render_function_md(func));
        }

        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_function_md(func: &FunctionDoc) -> String {
    let mut out = String::new();
    if func.name.is_empty() {
        out.push_str("##\n");
    } else {
        out.push_str(&format!("## {}\n", func.name));
    }

    if !func.desc.is_empty() {
        out.push_str(&prose(&func.desc));
        out.push('\n');
    }

    for param in &func.params {
        out.push_str(&format!(
            "- **{}** (`{}`): {}\n",
            param.name, param.ty, param.desc
        ));
    }

    if !func.returns.is_empty() {
        out.push_str(&format!(
            "**Returns**: `{}` - {}\n",
            func.returns.ty, func.returns.desc
        ));
    }

    out.push('\n');
    out
}

fn prose(text: &str) -> String {
    if text.starts_with(MARKUP_STARTS) || is_canonical(text) {
        format!("{}{}", ESCAPE, text)
    } else {
        text.to_string()
    }
}
