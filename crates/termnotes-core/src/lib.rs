//! # termnotes core
//!
//! Core library for termnotes - a single-user note store that keeps note
//! content encrypted at rest.
//!
//! ## Architecture
//!
//! - **crypto**: AES-256-GCM envelopes and the persisted store key
//! - **storage**: `RecordStore` trait and the SQLite backend
//! - **notebook**: the store handle (add/get/update/delete/undo, search, export/import)
//! - **fs**: atomic file writes
//!
//! ```no_run
//! use termnotes_core::Notebook;
//!
//! # fn main() -> termnotes_core::Result<()> {
//! let notebook = Notebook::open_in_memory()?;
//! let note = notebook.add("Buy milk", None)?;
//! notebook.soft_delete(note.id)?;
//! notebook.undo()?;
//! # Ok(())
//! # }
//! ```

pub mod crypto;
pub mod error;
pub mod fs;
pub mod notebook;
pub mod storage;

pub use error::{NotesError, Result};
pub use notebook::{export_file_name, ExportRecord, ImportSummary, IntoNoteId, Notebook};
pub use storage::{Listing, NewNote, Note, NoteId, RecordStore, Restored};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
