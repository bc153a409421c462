//! Text and table output formatting for notes.

use termnotes_core::storage::{Listing, UnreadableNote};
use termnotes_core::Note;

use crate::constants::PREVIEW_CHARS;
use crate::ui::theme::styles;
use crate::ui::{badge, kv, print, render::styled, simple_table, Badge, Column, UiContext};

/// First line of the content, cut to a fixed number of characters.
pub fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    let mut out: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if first_line.chars().count() > PREVIEW_CHARS || content.lines().nth(1).is_some() {
        out.push_str("...");
    }
    out
}

/// Print a single note in full.
pub fn print_note(ctx: &UiContext, note: &Note, quiet: bool) {
    if !quiet {
        print(ctx, &kv(ctx, "ID", &note.id.to_string()));
        if let Some(title) = &note.title {
            print(ctx, &kv(ctx, "Title", &styled(title, styles::bold(), ctx.color)));
        }
        print(ctx, &kv(ctx, "Created", &ctx.format_time(&note.timestamp)));
        if let Some(deleted_at) = &note.deleted_at {
            print(ctx, &kv(ctx, "Deleted", &ctx.format_time(deleted_at)));
        }
        println!();
    }
    println!("{}", note.content);
}

/// Print a listing as a table.
pub fn print_listing(ctx: &UiContext, listing: &Listing, show_state: bool) {
    let mut columns = vec![Column::new("ID"), Column::new("CREATED"), Column::new("TITLE")];
    if show_state {
        columns.push(Column::new("STATE"));
    }
    columns.push(Column::new("NOTE"));

    let rows: Vec<Vec<String>> = listing
        .iter()
        .map(|note| {
            let mut row = vec![
                note.id.to_string(),
                ctx.format_time(&note.timestamp),
                note.title.clone().unwrap_or_default(),
            ];
            if show_state {
                row.push(if note.deleted { "deleted" } else { "active" }.to_string());
            }
            row.push(preview(&note.content));
            row
        })
        .collect();

    if !rows.is_empty() {
        print(ctx, &simple_table(ctx, &columns, &rows));
    }
    print_unreadable(ctx, &listing.unreadable);
}

/// Warn about notes that could not be decrypted.
pub fn print_unreadable(ctx: &UiContext, unreadable: &[UnreadableNote]) {
    for note in unreadable {
        eprintln!(
            "{}",
            badge(
                ctx,
                Badge::Warn,
                &format!("Note {} could not be decrypted: {}", note.id, note.reason)
            )
        );
    }
}
