//! Handlers for single-note commands and listings.

use termnotes_core::{Listing, Note, Restored};

use crate::app::AppContext;
use crate::cli::{AddArgs, EditArgs, IdArgs, JsonArgs, ListArgs, RestoreArgs, SearchArgs, ShowArgs};
use crate::errors::CliError;
use crate::output::{listing_json, note_json, print_listing, print_note, print_unreadable};
use crate::ui::{badge, hint, print, Badge, UiContext};

const LIST_HINT: &str = "Hint: Run `termnotes list` to see note ids.";
const TRASH_HINT: &str = "Hint: Run `termnotes trash` to see deleted notes.";

fn note_not_found(id: &str) -> CliError {
    CliError::not_found(format!("Note {} not found", id.trim()), LIST_HINT)
}

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let (notebook, paths) = ctx.open_notebook()?;
    let content = args.content.join(" ");
    let note = notebook.add(&content, args.title.as_deref())?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, Some(&paths));
        print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, &format!("Added note {}", note.id)));
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let (notebook, paths) = ctx.open_notebook()?;
    let listing = notebook.get_all(args.all)?;
    let ui_ctx = ctx.ui_context(args.json, Some(&paths));
    render_listing(ctx, &ui_ctx, &listing, args.all, "No notes yet. Add one with `termnotes add <text>`.")
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let (notebook, paths) = ctx.open_notebook()?;
    let note = notebook
        .get(args.id.as_str())?
        .ok_or_else(|| note_not_found(&args.id))?;

    let ui_ctx = ctx.ui_context(args.json, Some(&paths));
    render_note(ctx, &ui_ctx, &note)
}

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let (notebook, paths) = ctx.open_notebook()?;
    let content = args.content.join(" ");
    let note = notebook
        .update(args.id.as_str(), &content, args.title.as_deref())?
        .ok_or_else(|| note_not_found(&args.id))?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, Some(&paths));
        print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, &format!("Updated note {}", note.id)));
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let (notebook, paths) = ctx.open_notebook()?;
    if !notebook.soft_delete(args.id.as_str())? {
        return Err(note_not_found(&args.id).into());
    }

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, Some(&paths));
        print(
            &ui_ctx,
            &badge(&ui_ctx, Badge::Ok, &format!("Deleted note {}", args.id.trim())),
        );
        print(&ui_ctx, &hint(&ui_ctx, "Run `termnotes undo` to restore it."));
    }
    Ok(())
}

pub fn handle_purge(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let (notebook, paths) = ctx.open_notebook()?;
    if !notebook.hard_delete(args.id.as_str())? {
        return Err(note_not_found(&args.id).into());
    }

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, Some(&paths));
        print(
            &ui_ctx,
            &badge(
                &ui_ctx,
                Badge::Ok,
                &format!("Permanently deleted note {}", args.id.trim()),
            ),
        );
    }
    Ok(())
}

pub fn handle_undo(ctx: &AppContext) -> anyhow::Result<()> {
    let (notebook, paths) = ctx.open_notebook()?;
    let restored = notebook
        .undo()?
        .ok_or_else(|| CliError::not_found("Nothing to undo", TRASH_HINT))?;
    report_restored(ctx, &ctx.ui_context(false, Some(&paths)), &restored);
    Ok(())
}

pub fn handle_restore(ctx: &AppContext, args: &RestoreArgs) -> anyhow::Result<()> {
    let (notebook, paths) = ctx.open_notebook()?;
    let restored = notebook
        .restore_or_undo(args.id.as_deref())?
        .ok_or_else(|| match &args.id {
            Some(id) => CliError::not_found(
                format!("No deleted note with id {}", id.trim()),
                TRASH_HINT,
            ),
            None => CliError::not_found("Nothing to restore", TRASH_HINT),
        })?;
    report_restored(ctx, &ctx.ui_context(false, Some(&paths)), &restored);
    Ok(())
}

pub fn handle_trash(ctx: &AppContext, args: &JsonArgs) -> anyhow::Result<()> {
    let (notebook, paths) = ctx.open_notebook()?;
    let listing = notebook.get_deleted()?;
    let ui_ctx = ctx.ui_context(args.json, Some(&paths));
    render_listing(ctx, &ui_ctx, &listing, false, "Trash is empty.")
}

pub fn handle_search(ctx: &AppContext, args: &SearchArgs) -> anyhow::Result<()> {
    let query = args.query.join(" ");
    if query.trim().is_empty() {
        return Err(CliError::invalid_input("Usage: termnotes search <query>").into());
    }

    let (notebook, paths) = ctx.open_notebook()?;
    let listing = notebook.search(&query)?;
    let ui_ctx = ctx.ui_context(args.json, Some(&paths));
    render_listing(
        ctx,
        &ui_ctx,
        &listing,
        false,
        &format!("No notes match \"{}\".", query),
    )
}

fn report_restored(ctx: &AppContext, ui_ctx: &UiContext, restored: &Restored) {
    if !ctx.quiet() {
        print(
            ui_ctx,
            &badge(ui_ctx, Badge::Ok, &format!("Restored note {}", restored.id())),
        );
    }
    if let Restored::Unreadable(unreadable) = restored {
        print_unreadable(ui_ctx, std::slice::from_ref(unreadable));
    }
}

fn render_note(ctx: &AppContext, ui_ctx: &UiContext, note: &Note) -> anyhow::Result<()> {
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&note_json(note))?);
    } else {
        print_note(ui_ctx, note, ctx.quiet());
    }
    Ok(())
}

fn render_listing(
    ctx: &AppContext,
    ui_ctx: &UiContext,
    listing: &Listing,
    show_state: bool,
    empty_message: &str,
) -> anyhow::Result<()> {
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&listing_json(listing))?);
        return Ok(());
    }
    if listing.is_empty() && listing.unreadable.is_empty() {
        if !ctx.quiet() {
            print(ui_ctx, empty_message);
        }
        return Ok(());
    }
    print_listing(ui_ctx, listing, show_state);
    Ok(())
}
