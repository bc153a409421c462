//! Rendering primitives for CLI output.

use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};
use owo_colors::{OwoColorize, Style};

use super::context::UiContext;
use super::theme::{styles, Badge};

/// Apply a style when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored_badge = styled(kind.text(), kind.style(), ctx.color);
    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Column definition for tables.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Render a borderless table.
///
/// Pretty mode: aligned columns with dim headers
/// Plain mode: tab-separated rows, no header
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if ctx.mode.is_pretty() {
        let mut table = ComfyTable::new();
        table.load_preset(comfy_table::presets::NOTHING);
        table.set_content_arrangement(ContentArrangement::Dynamic);

        let header_cells: Vec<Cell> = columns
            .iter()
            .map(|c| {
                let mut cell = Cell::new(c.header);
                if ctx.color {
                    cell = cell.add_attribute(Attribute::Dim);
                }
                cell
            })
            .collect();
        table.set_header(header_cells);

        for i in 0..columns.len() {
            if let Some(column) = table.column_mut(i) {
                column.set_padding((0, 2));
            }
        }

        for row in rows {
            table.add_row(row);
        }
        table.to_string()
    } else {
        rows.iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Print a line unless in JSON mode.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Format an error message with optional hint.
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h));
        }
    }
    lines.join("\n")
}

/// Print an error to stderr.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mode::OutputMode;

    fn pretty() -> UiContext {
        UiContext {
            mode: OutputMode::Pretty,
            ..UiContext::plain()
        }
    }

    #[test]
    fn test_styled_without_color_is_identity() {
        assert_eq!(styled("abc", styles::bold(), false), "abc");
        assert_ne!(styled("abc", styles::bold(), true), "abc");
    }

    #[test]
    fn test_kv_modes() {
        assert_eq!(kv(&UiContext::plain(), "Deleted At", "x"), "deleted_at=x");
        assert_eq!(kv(&pretty(), "Title", "x"), "Title: x");
    }

    #[test]
    fn test_plain_table_is_tab_separated() {
        let rows = vec![
            vec!["1".to_string(), "Buy milk".to_string()],
            vec!["2".to_string(), "Call Bob".to_string()],
        ];
        let out = simple_table(&UiContext::plain(), &[Column::new("ID"), Column::new("NOTE")], &rows);
        assert_eq!(out, "1\tBuy milk\n2\tCall Bob");
    }

    #[test]
    fn test_pretty_table_has_headers() {
        let rows = vec![vec!["1".to_string(), "Buy milk".to_string()]];
        let out = simple_table(&pretty(), &[Column::new("ID"), Column::new("NOTE")], &rows);
        assert!(out.contains("ID"));
        assert!(out.contains("Buy milk"));
    }

    #[test]
    fn test_error_message_plain() {
        let out = error_message(&UiContext::plain(), "Note 3 not found", Some("run list"));
        assert_eq!(out, "error=Note 3 not found\nhint=run list");
    }
}
