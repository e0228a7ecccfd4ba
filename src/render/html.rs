//! HTML renderer for sidebar and content fragments of one module.
//!
//! Values are interpolated verbatim: `.ndoc` sources are authored by the
//! documentation writer and may carry their own inline markup.

use crate::config::SiteConfig;
use crate::model::*;
use crate::parser;
use crate::render::page::{self, Mode};
use crate::render::Renderer;

/// The two slots of the page shell filled by a rendered module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragments {
    pub sidebar: String,
    pub content: String,
}

/// Renders a standalone page wrapped in the site shell (static builds).
pub struct HtmlRenderer {
    site: SiteConfig,
}

impl HtmlRenderer {
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &Document) -> String {
        let fragments = render_fragments(doc);
        page::shell(&self.site, &doc.module.name, &fragments, Mode::Static)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

/// Re-parse raw source (either dialect) and render it.
pub fn render_text(text: &str) -> Fragments {
    render_fragments(&parser::load(text))
}

/// Render a Document into sidebar and content fragments.
pub fn render_fragments(doc: &Document) -> Fragments {
    Fragments {
        sidebar: render_sidebar(&doc.module),
        content: render_content(&doc.module),
    }
}

fn render_sidebar(module: &ModuleDoc) -> String {
    let mut out = String::new();
    out.push_str(&format!("<h3>{}</h3>\n", module.name));
    out.push_str("<ul>\n");
    out.push_str("  <li><a href=\"#overview\" data-section=\"overview\">Home</a></li>\n");
    out.push_str("  <li><a href=\"#functions\" data-section=\"functions\">Functions</a></li>\n");
    out.push_str("</ul>\n");
    out
}

fn render_content(module: &ModuleDoc) -> String {
    let mut out = String::new();

    out.push_str("<section id=\"overview\">\n");
    out.push_str(&format!("<h1>{}</h1>\n", module.name));
    if !module.desc.is_empty() {
        out.push_str(&format!("<p>{}</p>\n", module.desc));
    }
    out.push_str("</section>\n");

    out.push_str("<details id=\"functions\" open>\n");
    out.push_str("<summary><h2>Functions</h2></summary>\n");
    for func in &module.functions {
        out.push_str(&render_function(func));
    }
    out.push_str("</details>\n");

    out
}

fn render_function(func: &FunctionDoc) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "<article class=\"function\" data-name=\"{}\">\n",
        func.name
    ));
    out.push_str(&format!("<h3>{}</h3>\n", func.name));

    if !func.desc.is_empty() {
        out.push_str(&format!("<p>{}</p>\n", func.desc));
    }

    // Parameters
    if !func.params.is_empty() {
        out.push_str("<h4>Parameters</h4>\n");
        out.push_str("<table class=\"params\">\n");
        out.push_str("  <thead><tr><th>Name</th><th>Type</th><th>Description</th></tr></thead>\n");
        out.push_str("  <tbody>\n");
        for param in &func.params {
            out.push_str(&format!(
                "    <tr><td><code>{}</code></td><td><code>{}</code></td><td>{}</td></tr>\n",
                param.name, param.ty, param.desc
            ));
        }
        out.push_str("  </tbody>\n</table>\n");
    }

    // Returns
    if !func.returns.is_empty() {
        out.push_str("<h4>Returns</h4>\n");
        out.push_str(&format!(
            "<p><strong>{}</strong>: {}</p>\n",
            func.returns.ty, func.returns.desc
        ));
    }

    out.push_str("</article>\n");
    out
}
