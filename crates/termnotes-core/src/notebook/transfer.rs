//! Bulk export and import in the portable JSON interchange format.
//!
//! The format is a JSON array of plaintext notes:
//!
//! ```text
//! [{"id": 1, "content": "Buy milk", "title": "Groceries", "timestamp": "2024-05-01T10:00:00.000Z"}]
//! ```
//!
//! Import re-creates notes rather than restoring identities: source ids are
//! ignored and every imported note gets a fresh id, while content, title and
//! timestamp are preserved.

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::Notebook;
use crate::error::{NotesError, Result};
use crate::storage::{NewNote, NoteId};

/// One note in the interchange format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub id: NoteId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Fields accepted per entry on import. Anything else in the entry is ignored.
#[derive(Debug, Deserialize)]
struct ImportEntry {
    content: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

/// Outcome of an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Notes successfully added
    pub imported: usize,
    /// Entries skipped as malformed
    pub skipped: usize,
}

/// Default file name for a backup taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("terminal-notes-backup-{}.json", date.format("%Y-%m-%d"))
}

impl Notebook {
    /// Plaintext snapshot of every active note, in insertion order.
    ///
    /// Notes that fail to decrypt are left out and logged.
    pub fn export(&self) -> Result<Vec<ExportRecord>> {
        let listing = self.get_all(false)?;
        if !listing.unreadable.is_empty() {
            warn!(
                "Export skipped {} unreadable note(s)",
                listing.unreadable.len()
            );
        }
        Ok(listing
            .into_iter()
            .map(|note| ExportRecord {
                id: note.id,
                content: note.content,
                title: note.title,
                timestamp: note.timestamp,
            })
            .collect())
    }

    /// [`Notebook::export`] serialized as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export()?)?)
    }

    /// Add every well-formed entry of a JSON array as a new note.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::Format` if the payload is not JSON or not an
    /// array; nothing is added in that case. Malformed entries are skipped.
    /// Storage or crypto failures abort, keeping the notes added so far.
    pub fn import(&self, json: &str) -> Result<ImportSummary> {
        let payload: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| NotesError::Format(format!("Import payload is not valid JSON: {}", e)))?;
        let serde_json::Value::Array(entries) = payload else {
            return Err(NotesError::Format(
                "Import payload must be a JSON array of notes".to_string(),
            ));
        };

        let mut summary = ImportSummary::default();
        for (index, value) in entries.into_iter().enumerate() {
            let entry = match serde_json::from_value::<ImportEntry>(value) {
                Ok(entry) if !entry.content.trim().is_empty() => entry,
                Ok(_) => {
                    warn!("Skipping import entry {}: empty content", index);
                    summary.skipped += 1;
                    continue;
                }
                Err(err) => {
                    warn!("Skipping import entry {}: {}", index, err);
                    summary.skipped += 1;
                    continue;
                }
            };

            self.add_note(NewNote {
                content: entry.content,
                title: entry.title,
                timestamp: entry.timestamp,
            })?;
            summary.imported += 1;
        }

        debug!(
            "Imported {} note(s), skipped {}",
            summary.imported, summary.skipped
        );
        Ok(summary)
    }
}
