//! Store lifecycle: init, clear, check.

use termnotes_core::Notebook;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::{ClearArgs, InitArgs};
use crate::config::{
    default_key_path, default_store_path, expand_home, read_config, write_config, NotesConfig,
};
use crate::errors::CliError;
use crate::ui::{badge, hint, kv, print, Badge};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = match args.config_path.as_deref() {
        Some(path) => expand_home(path)?,
        None => resolve_config_path()?,
    };
    let existing = if config_path.exists() {
        Some(read_config(&config_path)?)
    } else {
        None
    };

    let store_path = match (args.path.as_deref().or(ctx.store_override()), &existing) {
        (Some(path), _) => expand_home(path)?,
        (None, Some(cfg)) => expand_home(&cfg.store.path)?,
        (None, None) => default_store_path()?,
    };
    let configured_key = existing
        .as_ref()
        .filter(|cfg| expand_home(&cfg.store.path).ok().as_ref() == Some(&store_path))
        .and_then(|cfg| cfg.key.path.as_deref());
    let key_path = match args.key_path.as_deref().or(configured_key) {
        Some(path) => expand_home(path)?,
        None => default_key_path(&store_path),
    };

    let already_initialized = store_path.exists();
    let notebook = Notebook::open(&store_path, &key_path)?;
    notebook.ensure_key()?;

    let mut config = existing.unwrap_or_else(|| NotesConfig::new(&store_path, None));
    config.store.path = store_path.to_string_lossy().to_string();
    config.key.path = if key_path == default_key_path(&store_path) {
        None
    } else {
        Some(key_path.to_string_lossy().to_string())
    };
    write_config(&config_path, &config)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, None);
        let message = if already_initialized {
            "Notes store already exists; config updated"
        } else {
            "Initialized notes store"
        };
        print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, message));
        print(&ui_ctx, &kv(&ui_ctx, "Store", &store_path.display().to_string()));
        print(&ui_ctx, &kv(&ui_ctx, "Key", &key_path.display().to_string()));
        print(&ui_ctx, &kv(&ui_ctx, "Config", &config_path.display().to_string()));
        print(
            &ui_ctx,
            &hint(&ui_ctx, "Back up the key file; notes cannot be read without it."),
        );
    }
    Ok(())
}

pub fn handle_clear(ctx: &AppContext, args: &ClearArgs) -> anyhow::Result<()> {
    if !args.yes {
        return Err(CliError::invalid_input(
            "Refusing to delete every note without --yes (this cannot be undone)",
        )
        .into());
    }

    let (notebook, paths) = ctx.open_notebook()?;
    let removed = notebook.clear()?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, Some(&paths));
        print(
            &ui_ctx,
            &badge(
                &ui_ctx,
                Badge::Ok,
                &format!("Permanently deleted {} note(s)", removed),
            ),
        );
    }
    Ok(())
}

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let (notebook, paths) = ctx.open_notebook()?;
    let ui_ctx = ctx.ui_context(false, Some(&paths));

    let report = notebook
        .check_integrity()
        .map_err(|e| CliError::integrity_failed(format!("Integrity check failed: {}", e)))?;
    let metadata = notebook.metadata()?;

    if !ctx.quiet() {
        print(&ui_ctx, &kv(&ui_ctx, "Store", &paths.store.display().to_string()));
        print(&ui_ctx, &kv(&ui_ctx, "Key", &paths.key.display().to_string()));
        print(&ui_ctx, &kv(&ui_ctx, "Config", &paths.config.display().to_string()));
        print(
            &ui_ctx,
            &kv(&ui_ctx, "Schema version", &metadata.schema_version.to_string()),
        );
        print(
            &ui_ctx,
            &kv(&ui_ctx, "Created", &ui_ctx.format_time(&metadata.created_at)),
        );
        print(&ui_ctx, &kv(&ui_ctx, "Active", &metadata.active_notes.to_string()));
        print(&ui_ctx, &kv(&ui_ctx, "Deleted", &metadata.deleted_notes.to_string()));
        print(&ui_ctx, &kv(&ui_ctx, "Checked", &report.checked.to_string()));
    }

    if !report.legacy.is_empty() {
        let ids: Vec<String> = report.legacy.iter().map(|id| id.to_string()).collect();
        print(
            &ui_ctx,
            &badge(
                &ui_ctx,
                Badge::Warn,
                &format!("Unencrypted legacy note(s): {}", ids.join(", ")),
            ),
        );
    }

    if !report.is_clean() {
        for note in &report.unreadable {
            eprintln!(
                "{}",
                badge(
                    &ui_ctx,
                    Badge::Err,
                    &format!("Note {} could not be decrypted: {}", note.id, note.reason)
                )
            );
        }
        return Err(CliError::integrity_failed(format!(
            "Integrity check failed: {} of {} note(s) unreadable",
            report.unreadable.len(),
            report.checked
        ))
        .into());
    }

    if !ctx.quiet() {
        print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "All checks passed"));
    }
    Ok(())
}
