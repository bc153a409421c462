//! Core data types for the storage layer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NotesError, Result};

/// Identifier assigned by the store when a note is created.
///
/// Always positive; never reused for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw id, rejecting zero and negative values.
    pub fn new(raw: i64) -> Result<Self> {
        if raw <= 0 {
            return Err(NotesError::Usage(format!(
                "Note id must be a positive integer (got {})",
                raw
            )));
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw record as persisted: content is the stored envelope string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub id: NoteId,
    pub title: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Fields for a record about to be inserted.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub title: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A note with its content decrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier
    pub id: NoteId,

    /// Optional plaintext title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Decrypted content
    pub content: String,

    /// Creation time (immutable)
    pub timestamp: DateTime<Utc>,

    /// Soft-delete flag
    #[serde(default)]
    pub deleted: bool,

    /// When the note was last soft-deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Builder for creating new notes.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub content: String,
    pub title: Option<String>,
    /// Creation time; defaults to now
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewNote {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            title: None,
            timestamp: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Which records a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    /// Active notes in insertion order
    Active,
    /// Soft-deleted notes, most recently deleted first
    Deleted,
    /// Every note in insertion order
    All,
}

/// A note whose stored content could not be decrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadableNote {
    pub id: NoteId,
    pub reason: String,
}

/// Outcome of restoring a note from the trash.
///
/// The restore is committed before the content is opened, so a note whose
/// content fails to decrypt is still reported as restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restored {
    Note(Note),
    Unreadable(UnreadableNote),
}

impl Restored {
    pub fn id(&self) -> NoteId {
        match self {
            Restored::Note(note) => note.id,
            Restored::Unreadable(unreadable) => unreadable.id,
        }
    }

    pub fn note(&self) -> Option<&Note> {
        match self {
            Restored::Note(note) => Some(note),
            Restored::Unreadable(_) => None,
        }
    }

    pub fn into_note(self) -> Option<Note> {
        match self {
            Restored::Note(note) => Some(note),
            Restored::Unreadable(_) => None,
        }
    }
}

/// Result of a multi-note read.
///
/// Per-note decryption failures are collected in `unreadable` instead of
/// failing the whole read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub notes: Vec<Note>,
    pub unreadable: Vec<UnreadableNote>,
}

impl Listing {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn ids(&self) -> Vec<NoteId> {
        self.notes.iter().map(|note| note.id).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }
}

impl IntoIterator for Listing {
    type Item = Note;
    type IntoIter = std::vec::IntoIter<Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.into_iter()
    }
}

/// Metadata for a note store.
#[derive(Debug, Clone, Serialize)]
pub struct StoreMetadata {
    /// Schema version of the database
    pub schema_version: i64,

    /// When the store was created
    pub created_at: DateTime<Utc>,

    /// Number of active notes
    pub active_notes: usize,

    /// Number of soft-deleted notes
    pub deleted_notes: usize,
}

/// Outcome of an integrity check.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    /// Number of notes examined
    pub checked: usize,

    /// Notes still stored as unencrypted legacy plaintext
    pub legacy: Vec<NoteId>,

    /// Notes whose envelopes failed to decrypt
    pub unreadable: Vec<UnreadableNote>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.unreadable.is_empty()
    }
}
