//! Debounced file watcher that turns changes under the docs directory into
//! reload triggers.

use anyhow::{Context, Result};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::broadcast;

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Keeps the underlying watcher alive; dropping it stops watching.
pub struct DocsWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl DocsWatcher {
    /// Watch `dir` recursively and send `()` on `reload` after each burst of
    /// changes. Changes to dotfiles are ignored.
    pub fn new(dir: &Path, reload: broadcast::Sender<()>) -> Result<Self> {
        let root = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let filter_root = root.clone();

        let mut debouncer = new_debouncer(DEBOUNCE, move |res: DebounceEventResult| match res {
            Ok(events) => {
                let changed: Vec<&PathBuf> = events
                    .iter()
                    .map(|e| &e.path)
                    .filter(|p| !is_hidden(&filter_root, p))
                    .collect();
                if changed.is_empty() {
                    return;
                }
                for path in &changed {
                    tracing::debug!("File change detected: {}", path.display());
                }
                tracing::info!("File changed, reloading...");
                // No connected clients is not an error
                let _ = reload.send(());
            }
            Err(e) => tracing::warn!("Watcher error: {}", e),
        })
        .context("failed to create file watcher")?;

        debouncer
            .watcher()
            .watch(&root, RecursiveMode::Recursive)
            .with_context(|| format!("failed to watch {}", root.display()))?;

        tracing::info!("Watching {} for changes", root.display());
        Ok(Self {
            _debouncer: debouncer,
        })
    }
}

/// True when any path component below `root` starts with a dot.
fn is_hidden(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}
