//! The notebook: an explicit store handle tying a record store to a crypto
//! provider.
//!
//! Every content-bearing write goes through encryption and every
//! content-bearing read through decryption; callers only ever see plaintext.
//! Construct one `Notebook` at startup and pass it to whatever needs it.
//!
//! Lifecycle of a note:
//!
//! ```text
//! Active --soft_delete--> Deleted --restore/undo--> Active
//! Active | Deleted --hard_delete/clear--> gone
//! ```

mod id;
mod query;
mod transfer;

use std::path::Path;

use chrono::Utc;
use log::{debug, warn};

use crate::crypto::{CryptoProvider, FileKeyStore, KeyStore, MemoryKeyStore};
use crate::error::{NotesError, Result};
use crate::storage::{
    IntegrityReport, Listing, NewNote, NewRecord, Note, NoteId, NoteRecord, RecordScope,
    RecordStore, Restored, SqliteRecordStore, StoreMetadata, UnreadableNote,
};

pub use id::IntoNoteId;
pub use transfer::{export_file_name, ExportRecord, ImportSummary};

/// Handle to one encrypted note store.
pub struct Notebook {
    records: Box<dyn RecordStore>,
    crypto: CryptoProvider,
}

impl Notebook {
    pub fn new(records: impl RecordStore + 'static, keys: impl KeyStore + 'static) -> Self {
        Self {
            records: Box::new(records),
            crypto: CryptoProvider::new(keys),
        }
    }

    /// Open a SQLite database with its key file, creating both as needed.
    pub fn open(db_path: &Path, key_path: &Path) -> Result<Self> {
        let records = SqliteRecordStore::open(db_path)?;
        Ok(Self::new(records, FileKeyStore::new(key_path)))
    }

    /// Ephemeral notebook with an in-memory database and key.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(
            SqliteRecordStore::open_in_memory()?,
            MemoryKeyStore::new(),
        ))
    }

    /// Make sure the store key exists, generating it on first use.
    pub fn ensure_key(&self) -> Result<()> {
        self.crypto.ensure_key().map(|_| ())
    }

    /// Create a note with the current time as its timestamp.
    pub fn add(&self, content: &str, title: Option<&str>) -> Result<Note> {
        let mut new = NewNote::new(content);
        new.title = title.map(str::to_string);
        self.add_note(new)
    }

    /// Create a note from a builder, honoring an explicit timestamp.
    pub fn add_note(&self, new: NewNote) -> Result<Note> {
        let content = require_content(&new.content)?;
        let title = normalize_title(new.title.as_deref());

        let record = NewRecord {
            title: title.clone(),
            content: self.crypto.encrypt(content)?,
            timestamp: new.timestamp.unwrap_or_else(Utc::now),
        };
        let stored = self.records.insert(&record)?;
        debug!("Added note {}", stored.id);

        Ok(Note {
            id: stored.id,
            title,
            content: content.to_string(),
            timestamp: stored.timestamp,
            deleted: false,
            deleted_at: None,
        })
    }

    /// Get an active note by id. Deleted notes are not returned.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::Crypto` if the stored content fails to decrypt.
    pub fn get(&self, id: impl IntoNoteId) -> Result<Option<Note>> {
        let id = id.into_note_id()?;
        match self.records.fetch(id)? {
            Some(record) if !record.deleted => Ok(Some(self.open_record(record)?)),
            _ => Ok(None),
        }
    }

    /// Replace content and title of an active note.
    ///
    /// Id, timestamp and deletion state are left untouched. Returns `None`
    /// if there is no active note with this id.
    pub fn update(
        &self,
        id: impl IntoNoteId,
        content: &str,
        title: Option<&str>,
    ) -> Result<Option<Note>> {
        let id = id.into_note_id()?;
        let content = require_content(content)?;
        let title = normalize_title(title);

        let envelope = self.crypto.encrypt(content)?;
        let Some(updated) = self
            .records
            .update_content(id, title.as_deref(), &envelope)?
        else {
            return Ok(None);
        };
        debug!("Updated note {}", id);

        Ok(Some(Note {
            id: updated.id,
            title: updated.title,
            content: content.to_string(),
            timestamp: updated.timestamp,
            deleted: updated.deleted,
            deleted_at: updated.deleted_at,
        }))
    }

    /// Soft-delete an active note. Returns `false` if absent or already deleted.
    pub fn soft_delete(&self, id: impl IntoNoteId) -> Result<bool> {
        let id = id.into_note_id()?;
        let deleted = self.records.soft_delete(id)?;
        if deleted {
            debug!("Soft-deleted note {}", id);
        }
        Ok(deleted)
    }

    /// Restore a specific soft-deleted note. Returns `false` if absent or active.
    pub fn restore(&self, id: impl IntoNoteId) -> Result<bool> {
        let id = id.into_note_id()?;
        self.records.restore(id)
    }

    /// Restore a specific note, or the most recently deleted one when `id` is `None`.
    ///
    /// Returns `None` if there was nothing to restore. A restored note whose
    /// content fails to decrypt comes back as [`Restored::Unreadable`]
    /// rather than an error, since the restore itself has been committed.
    pub fn restore_or_undo<I: IntoNoteId>(&self, id: Option<I>) -> Result<Option<Restored>> {
        let id = match id {
            Some(id) => {
                let id = id.into_note_id()?;
                if !self.records.restore(id)? {
                    return Ok(None);
                }
                id
            }
            None => match self.records.restore_latest()? {
                Some(id) => id,
                None => return Ok(None),
            },
        };
        debug!("Restored note {}", id);
        self.open_restored(id)
    }

    /// Restore the most recently soft-deleted note.
    ///
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&self) -> Result<Option<Restored>> {
        self.restore_or_undo(None::<NoteId>)
    }

    /// Permanently remove a note, active or deleted.
    pub fn hard_delete(&self, id: impl IntoNoteId) -> Result<bool> {
        let id = id.into_note_id()?;
        let removed = self.records.remove(id)?;
        if removed {
            debug!("Permanently deleted note {}", id);
        }
        Ok(removed)
    }

    /// Permanently remove every note. Ids keep counting up afterwards.
    pub fn clear(&self) -> Result<usize> {
        let removed = self.records.remove_all()?;
        debug!("Cleared {} notes", removed);
        Ok(removed)
    }

    /// All active notes in insertion order, plus deleted ones if requested.
    pub fn get_all(&self, include_deleted: bool) -> Result<Listing> {
        let scope = if include_deleted {
            RecordScope::All
        } else {
            RecordScope::Active
        };
        self.open_records(self.records.list(scope)?, |_| true)
    }

    pub fn metadata(&self) -> Result<StoreMetadata> {
        self.records.metadata()
    }

    /// Check the database and try to decrypt every stored note.
    pub fn check_integrity(&self) -> Result<IntegrityReport> {
        self.records.check_integrity()?;

        let mut report = IntegrityReport::default();
        for record in self.records.list(RecordScope::All)? {
            report.checked += 1;
            match self.crypto.decrypt(&record.content) {
                Ok(plaintext) if plaintext.is_legacy() => report.legacy.push(record.id),
                Ok(_) => {}
                Err(err) => report.unreadable.push(UnreadableNote {
                    id: record.id,
                    reason: err.to_string(),
                }),
            }
        }
        Ok(report)
    }

    fn open_restored(&self, id: NoteId) -> Result<Option<Restored>> {
        let Some(record) = self.records.fetch(id)? else {
            return Ok(None);
        };
        match self.open_record(record) {
            Ok(note) => Ok(Some(Restored::Note(note))),
            Err(NotesError::Crypto(reason)) => {
                warn!("Restored note {} could not be decrypted: {}", id, reason);
                Ok(Some(Restored::Unreadable(UnreadableNote { id, reason })))
            }
            Err(err) => Err(err),
        }
    }

    fn open_record(&self, record: NoteRecord) -> Result<Note> {
        let plaintext = self.crypto.decrypt(&record.content)?;
        if plaintext.is_legacy() {
            debug!("Note {} is stored as legacy plaintext", record.id);
        }
        Ok(Note {
            id: record.id,
            title: record.title,
            content: plaintext.into_string(),
            timestamp: record.timestamp,
            deleted: record.deleted,
            deleted_at: record.deleted_at,
        })
    }

    /// Decrypt a batch of records, keeping the ones `keep` accepts.
    ///
    /// Records that fail to decrypt go to `Listing::unreadable`; storage
    /// errors still abort.
    fn open_records(
        &self,
        records: Vec<NoteRecord>,
        keep: impl Fn(&Note) -> bool,
    ) -> Result<Listing> {
        let mut listing = Listing::default();
        for record in records {
            let id = record.id;
            match self.open_record(record) {
                Ok(note) => {
                    if keep(&note) {
                        listing.notes.push(note);
                    }
                }
                Err(NotesError::Crypto(reason)) => {
                    warn!("Note {} could not be decrypted: {}", id, reason);
                    listing.unreadable.push(UnreadableNote { id, reason });
                }
                Err(err) => return Err(err),
            }
        }
        Ok(listing)
    }
}

fn require_content(content: &str) -> Result<&str> {
    if content.trim().is_empty() {
        return Err(NotesError::Usage("Note content cannot be empty".to_string()));
    }
    Ok(content)
}

fn normalize_title(title: Option<&str>) -> Option<String> {
    title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
