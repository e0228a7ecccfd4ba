//! Site configuration loaded from `ndoc.yml` in the project root.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "ndoc.yml";

/// Placeholder replaced with the site title in `header` and `footer`.
const TITLE_PLACEHOLDER: &str = "{{title}}";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    /// Stylesheet URLs, one `<link>` each
    pub css: Vec<String>,
    /// Raw HTML; `{{title}}` is substituted
    pub header: String,
    /// Raw HTML; `{{title}}` is substituted
    pub footer: String,
    pub nav: Vec<NavItem>,
    /// Directory holding the `.ndoc` sources, relative to the project root
    pub docs: PathBuf,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NavItem {
    pub title: String,
    pub path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            css: Vec::new(),
            header: String::new(),
            footer: String::new(),
            nav: Vec::new(),
            docs: PathBuf::from("docs"),
            port: 3000,
        }
    }
}

impl SiteConfig {
    pub fn header_html(&self) -> String {
        self.header.replace(TITLE_PLACEHOLDER, &self.title)
    }

    pub fn footer_html(&self) -> String {
        self.footer.replace(TITLE_PLACEHOLDER, &self.title)
    }

    /// Docs directory resolved against the project root.
    pub fn docs_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.docs)
    }
}

/// Parse config from YAML text.
pub fn parse(text: &str) -> Result<SiteConfig> {
    // An empty file is an empty mapping, not an error.
    if text.trim().is_empty() {
        return Ok(SiteConfig::default());
    }
    serde_yaml::from_str(text).with_context(|| format!("error parsing {}", CONFIG_FILE))
}

/// Load `ndoc.yml` from `root`; fails when the file is missing.
pub fn load(root: &Path) -> Result<SiteConfig> {
    match load_optional(root)? {
        Some(config) => Ok(config),
        None => bail!(
            "{} not found in project root ({}). Please create one.",
            CONFIG_FILE,
            root.display()
        ),
    }
}

/// Load `ndoc.yml` from `root` if it exists.
pub fn load_optional(root: &Path) -> Result<Option<SiteConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse(&text).map(Some)
}
