//! Renderer module — trait-based format dispatch.

pub mod html;
pub mod json;
pub mod markdown;
pub mod page;

use crate::config::SiteConfig;
use crate::model::Document;
use anyhow::{anyhow, Result};

/// Trait for rendering a Document into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &Document) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
///
/// The site config only affects HTML, which wraps each page in the site shell.
pub fn create_renderer(format: &str, site: &SiteConfig) -> Result<Box<dyn Renderer>> {
    match format {
        "html" => Ok(Box::new(html::HtmlRenderer::new(site.clone()))),
        "json" => Ok(Box::new(json::JsonRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use html, json, or markdown",
            format
        )),
    }
}
