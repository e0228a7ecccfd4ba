//! Static documentation build.
//!
//! 1. Expand inputs (files, directories, glob patterns) to `.ndoc` sources
//! 2. Load each source through the shared parser (either dialect)
//! 3. Render and write one output file per source, mirroring the layout of
//!    scanned directories
//! 4. Copy non-`.ndoc` assets from the docs directory

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config;
use crate::parser;
use crate::render;

/// Source file extension.
pub const NDOC_EXTENSION: &str = "ndoc";

pub struct BuildConfig {
    /// Project root holding `ndoc.yml` and the docs directory.
    pub root: PathBuf,
    /// Input files or glob patterns; empty means the configured docs directory.
    pub inputs: Vec<String>,
    /// Output directory.
    pub output: PathBuf,
    /// Output format name (`html`, `json`, `markdown`).
    pub format: String,
}

/// A source file and the output name (relative path without extension) it
/// is written under.
#[derive(Debug, Clone, PartialEq)]
struct Source {
    path: PathBuf,
    name: String,
}

/// Run the build, returning the written page paths.
pub fn run(config: BuildConfig) -> Result<Vec<PathBuf>> {
    let site = config::load_optional(&config.root)?.unwrap_or_default();
    let renderer = render::create_renderer(&config.format, &site)?;
    let docs_dir = site.docs_dir(&config.root);

    let patterns = if config.inputs.is_empty() {
        if !docs_dir.is_dir() {
            bail!("No docs/ directory found at {}", docs_dir.display());
        }
        vec![docs_dir.to_string_lossy().to_string()]
    } else {
        config.inputs.clone()
    };

    let sources = expand_globs(&patterns)?;
    if sources.is_empty() {
        bail!("no .{} files found", NDOC_EXTENSION);
    }
    check_unique_names(&sources)?;
    tracing::info!("Found {} source files", sources.len());

    fs::create_dir_all(&config.output).with_context(|| {
        format!("failed to create output directory: {}", config.output.display())
    })?;

    let mut written = Vec::new();
    for source in &sources {
        let content = fs::read_to_string(&source.path)
            .with_context(|| format!("failed to read {}", source.path.display()))?;
        let doc = parser::load(&content);

        let out_path = config
            .output
            .join(format!("{}.{}", source.name, renderer.file_extension()));
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&out_path, renderer.render(&doc))
            .with_context(|| format!("failed to write {}", out_path.display()))?;

        tracing::info!("Wrote {}", out_path.display());
        written.push(out_path);
    }

    if config.inputs.is_empty() {
        let copied = copy_assets(&docs_dir, &config.output)?;
        if copied > 0 {
            tracing::info!("Copied {} asset files", copied);
        }
    }

    Ok(written)
}

/// Expand inputs into sources. Directories are walked recursively and keep
/// their layout; files and glob matches are named by their stem.
fn expand_globs(patterns: &[String]) -> Result<Vec<Source>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(Source {
                path: path.to_path_buf(),
                name: derive_output_name(path),
            });
            continue;
        }
        if path.is_dir() {
            files.extend(walk_sources(path));
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .map(|p| Source {
                name: derive_output_name(&p),
                path: p,
            })
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files.dedup_by(|a, b| a.path == b.path);
    Ok(files)
}

/// `.ndoc` files under `dir`, skipping dot entries.
fn walk_sources(dir: &Path) -> Vec<Source> {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_ndoc(e.path()))
        .map(|e| {
            let rel = e.path().strip_prefix(dir).unwrap_or(e.path());
            Source {
                path: e.path().to_path_buf(),
                name: relative_output_name(rel),
            }
        })
        .collect()
}

/// Two sources must not render to the same output file.
fn check_unique_names(sources: &[Source]) -> Result<()> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for source in sources {
        if let Some(first) = seen.insert(&source.name, &source.path) {
            bail!(
                "both {} and {} would be written to {}",
                first.display(),
                source.path.display(),
                source.name
            );
        }
    }
    Ok(())
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_ndoc(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(NDOC_EXTENSION)
}

/// "docs/math.ndoc" → "math"
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "index".to_string())
}

/// "guide/intro.ndoc" → "guide/intro", joined with `/` on every platform.
fn relative_output_name(rel: &Path) -> String {
    let stem = rel.with_extension("");
    stem.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Recursively copy everything except `.ndoc` sources and dotfiles.
fn copy_assets(src: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;
    let entries =
        fs::read_dir(src).with_context(|| format!("failed to read directory: {}", src.display()))?;
    for entry in entries.flatten() {
        let name = entry.file_name();
        if is_hidden(&name) {
            continue;
        }
        let src_path = entry.path();
        let dest_path = dest.join(&name);
        if src_path.is_dir() {
            fs::create_dir_all(&dest_path)
                .with_context(|| format!("failed to create {}", dest_path.display()))?;
            copied += copy_assets(&src_path, &dest_path)?;
        } else if !is_ndoc(&src_path) {
            fs::copy(&src_path, &dest_path).with_context(|| {
                format!("failed to copy {} to {}", src_path.display(), dest_path.display())
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir_all(docs.join("img")).unwrap();
        fs::write(
            docs.join("index.ndoc"),
            "[module: Math]\ndesc: Math utilities.\n[function: add]\nreturn: number - The sum\n",
        )
        .unwrap();
        fs::write(docs.join("strings.ndoc"), "# Strings\n## trim\nTrims.\n").unwrap();
        fs::write(docs.join("img/logo.svg"), "<svg/>").unwrap();
        fs::write(docs.join(".draft"), "ignored").unwrap();
        dir
    }

    fn config(root: &Path, format: &str) -> BuildConfig {
        BuildConfig {
            root: root.to_path_buf(),
            inputs: Vec::new(),
            output: root.join("build"),
            format: format.to_string(),
        }
    }

    #[test]
    fn output_name_from_stem() {
        assert_eq!(derive_output_name(Path::new("docs/math.ndoc")), "math");
        assert_eq!(derive_output_name(Path::new("index.ndoc")), "index");
    }

    #[test]
    fn builds_html_site_from_docs_dir() {
        let dir = project();
        let written = run(config(dir.path(), "html")).unwrap();
        assert_eq!(written.len(), 2);

        let build = dir.path().join("build");
        let index = fs::read_to_string(build.join("index.html")).unwrap();
        assert!(index.contains("<h1>Math</h1>"));
        assert!(index.contains("<strong>number</strong>: The sum"));

        // Markdown dialect goes through the same loader
        let strings = fs::read_to_string(build.join("strings.html")).unwrap();
        assert!(strings.contains("<h3>trim</h3>"));
        assert!(strings.contains("<p>Trims.</p>"));

        assert!(index.contains("document.getElementById('search')"));
        assert!(build.join("img/logo.svg").is_file());
        assert!(!build.join(".draft").exists());
        assert!(!build.join("index.ndoc").exists());
    }

    #[test]
    fn uses_site_config_when_present() {
        let dir = project();
        fs::write(dir.path().join("ndoc.yml"), "title: Site Title\n").unwrap();
        run(config(dir.path(), "html")).unwrap();
        let index = fs::read_to_string(dir.path().join("build/index.html")).unwrap();
        assert!(index.contains("<title>Site Title</title>"));
    }

    #[test]
    fn explicit_inputs_skip_asset_copy() {
        let dir = project();
        let mut cfg = config(dir.path(), "json");
        cfg.inputs = vec![format!("{}/docs/*.ndoc", dir.path().display())];
        let written = run(cfg).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join("build/index.json").is_file());
        assert!(!dir.path().join("build/img").exists());
    }

    #[test]
    fn nested_sources_keep_their_layout() {
        let dir = project();
        let guide = dir.path().join("docs/guide");
        fs::create_dir_all(&guide).unwrap();
        fs::write(guide.join("intro.ndoc"), "# Intro\n## start\n").unwrap();
        fs::create_dir_all(dir.path().join("docs/.cache")).unwrap();
        fs::write(dir.path().join("docs/.cache/old.ndoc"), "# Old").unwrap();

        let written = run(config(dir.path(), "html")).unwrap();
        assert_eq!(written.len(), 3);

        let intro = fs::read_to_string(dir.path().join("build/guide/intro.html")).unwrap();
        assert!(intro.contains("<h3>start</h3>"));
        assert!(!dir.path().join("build/.cache").exists());
    }

    #[test]
    fn colliding_output_names_fail() {
        let dir = TempDir::new().unwrap();
        for sub in ["a", "b"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("x.ndoc"), "# X").unwrap();
        }
        let mut cfg = config(dir.path(), "html");
        cfg.inputs = vec![
            dir.path().join("a/x.ndoc").display().to_string(),
            dir.path().join("b/x.ndoc").display().to_string(),
        ];
        let err = run(cfg).unwrap_err();
        assert!(err.to_string().contains("would be written to x"));
        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn relative_names_drop_only_the_extension() {
        assert_eq!(relative_output_name(Path::new("guide/intro.ndoc")), "guide/intro");
        assert_eq!(relative_output_name(Path::new("v1.2.ndoc")), "v1.2");
    }

    #[test]
    fn missing_docs_dir_fails() {
        let dir = TempDir::new().unwrap();
        let err = run(config(dir.path(), "html")).unwrap_err();
        assert!(err.to_string().contains("No docs/ directory found"));
    }

    #[test]
    fn unknown_format_fails_before_writing() {
        let dir = project();
        assert!(run(config(dir.path(), "pdf")).is_err());
        assert!(!dir.path().join("build").exists());
    }
}
