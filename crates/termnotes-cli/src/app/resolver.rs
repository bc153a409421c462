//! Path resolution for config, store and key files.

use std::path::PathBuf;

use log::debug;

use crate::config::{
    default_config_path, default_key_path, default_store_path, expand_home, read_config,
    NotesConfig,
};

/// Where the store, its key, and its config live for this invocation.
#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub config: PathBuf,
    pub store: PathBuf,
    pub key: PathBuf,
    /// Parsed config, if the file exists
    pub settings: Option<NotesConfig>,
}

/// Resolve the config file path, checking TERMNOTES_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("TERMNOTES_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve store and key paths.
///
/// The store comes from `--store`/`TERMNOTES_PATH`, then the config file,
/// then the XDG data default. A configured key path only applies to the
/// configured store; any other store uses its sibling `.key` file.
pub fn resolve_paths(store_override: Option<&str>) -> anyhow::Result<ResolvedPaths> {
    let config = resolve_config_path()?;
    let settings = if config.exists() {
        Some(read_config(&config)?)
    } else {
        None
    };

    let (store, key) = match (store_override, settings.as_ref()) {
        (Some(path), _) => {
            let store = expand_home(path)?;
            let key = default_key_path(&store);
            (store, key)
        }
        (None, Some(cfg)) => {
            let store = expand_home(&cfg.store.path)?;
            let key = match cfg.key.path.as_deref() {
                Some(key) => expand_home(key)?,
                None => default_key_path(&store),
            };
            (store, key)
        }
        (None, None) => {
            let store = default_store_path()?;
            let key = default_key_path(&store);
            (store, key)
        }
    };

    debug!(
        "Resolved store {} with key {}",
        store.display(),
        key.display()
    );
    Ok(ResolvedPaths {
        config,
        store,
        key,
        settings,
    })
}
