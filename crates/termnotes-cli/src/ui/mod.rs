//! UI primitives for the termnotes CLI.
//!
//! - **Context**: Environment detection (TTY, color, date format)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens and styles
//! - **Render**: Tables, badges, hints, key-value lines

mod context;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::Badge;

pub use render::{badge, hint, kv, print, print_error, simple_table, Column};
