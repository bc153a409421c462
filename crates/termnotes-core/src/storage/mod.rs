//! Storage abstraction for termnotes.
//!
//! This module defines the `RecordStore` trait and the record types that
//! flow through it. Record stores persist envelope strings and never see
//! plaintext content; the [`crate::notebook`] layer encrypts on the way in
//! and decrypts on the way out.
//!
//! ## Backends
//!
//! - SQLite (file or in-memory), one transaction per operation

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteRecordStore;
pub use traits::RecordStore;
pub use types::{
    IntegrityReport, Listing, NewNote, NewRecord, Note, NoteId, NoteRecord, RecordScope,
    Restored, StoreMetadata, UnreadableNote,
};
