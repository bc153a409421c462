//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying notes
//! as JSON, tables or plain text.

mod json;
mod text;

// Re-export public API
pub use json::{listing_json, note_json};
pub use text::{print_listing, print_note, print_unreadable};
