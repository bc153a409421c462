//! Application context shared by every command handler.

use termnotes_core::Notebook;

use super::resolver::{resolve_paths, ResolvedPaths};
use crate::cli::Cli;
use crate::constants::DEFAULT_DATE_FORMAT;
use crate::ui::UiContext;

/// CLI flags plus the resolved config.
pub struct AppContext {
    store_override: Option<String>,
    quiet: bool,
}

impl AppContext {
    pub fn new(cli: &Cli) -> Self {
        Self {
            store_override: cli.store.clone(),
            quiet: cli.quiet,
        }
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn store_override(&self) -> Option<&str> {
        self.store_override.as_deref()
    }

    pub fn paths(&self) -> anyhow::Result<ResolvedPaths> {
        resolve_paths(self.store_override())
    }

    /// Open the notebook at the resolved location, creating it on first use.
    pub fn open_notebook(&self) -> anyhow::Result<(Notebook, ResolvedPaths)> {
        let paths = self.paths()?;
        let notebook = Notebook::open(&paths.store, &paths.key).map_err(|e| {
            anyhow::Error::new(e).context(format!(
                "Failed to open notes database {}",
                paths.store.display()
            ))
        })?;
        Ok((notebook, paths))
    }

    /// UI context for a command, honoring `--json` and the configured date format.
    pub fn ui_context(&self, json: bool, paths: Option<&ResolvedPaths>) -> UiContext {
        let date_format = paths
            .and_then(|p| p.settings.as_ref())
            .and_then(|s| s.ui.date_format.clone())
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
        UiContext::from_env(json, date_format)
    }
}
