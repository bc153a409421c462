//! Export and import of the JSON interchange format.

use std::io::Read;
use std::path::PathBuf;

use chrono::Local;
use log::debug;
use termnotes_core::export_file_name;

use crate::app::AppContext;
use crate::cli::{ExportArgs, ImportArgs};
use crate::ui::{badge, print, Badge};

/// Where an export should go.
fn export_destination(args: &ExportArgs) -> Option<PathBuf> {
    if args.backup {
        return Some(PathBuf::from(export_file_name(Local::now().date_naive())));
    }
    match args.output.as_deref() {
        None | Some("-") => None,
        Some(path) => Some(PathBuf::from(path)),
    }
}

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let (notebook, paths) = ctx.open_notebook()?;
    let json = notebook.export_json()?;

    let Some(destination) = export_destination(args) else {
        println!("{}", json);
        return Ok(());
    };

    termnotes_core::fs::write_atomic(&destination, json.as_bytes()).map_err(|e| {
        anyhow::anyhow!("Failed to write export {}: {}", destination.display(), e)
    })?;
    debug!("Wrote {} bytes to {}", json.len(), destination.display());

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, Some(&paths));
        print(
            &ui_ctx,
            &badge(
                &ui_ctx,
                Badge::Ok,
                &format!("Exported notes to {}", destination.display()),
            ),
        );
    }
    Ok(())
}

fn read_import_source(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        return Ok(buffer);
    }
    std::fs::read_to_string(file).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file, e))
}

pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let payload = read_import_source(&args.file)?;
    let (notebook, paths) = ctx.open_notebook()?;
    let summary = notebook.import(&payload)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, Some(&paths));
        print(
            &ui_ctx,
            &badge(
                &ui_ctx,
                Badge::Ok,
                &format!("Imported {} note(s)", summary.imported),
            ),
        );
        if summary.skipped > 0 {
            print(
                &ui_ctx,
                &badge(
                    &ui_ctx,
                    Badge::Warn,
                    &format!("Skipped {} malformed entry(ies)", summary.skipped),
                ),
            );
        }
    }
    Ok(())
}
