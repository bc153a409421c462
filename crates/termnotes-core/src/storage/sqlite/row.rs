//! Note row type for database queries.

use chrono::{DateTime, Utc};

use crate::error::{NotesError, Result};
use crate::storage::types::{NoteId, NoteRecord};

/// Column list matching [`NoteRow::from_row`].
pub const NOTE_COLUMNS: &str = "id, title, content, timestamp, deleted, deleted_at";

/// Raw row data from the notes table, before parsing into domain types.
#[derive(Debug)]
pub struct NoteRow {
    pub id: i64,
    pub title: Option<String>,
    pub content: String,
    pub timestamp: String,
    pub deleted: bool,
    pub deleted_at: Option<String>,
}

impl NoteRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            timestamp: row.get(3)?,
            deleted: row.get(4)?,
            deleted_at: row.get(5)?,
        })
    }
}

fn parse_timestamp(value: &str, column: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| NotesError::Storage(format!("Invalid {} timestamp: {}", column, e)))
}

impl TryFrom<NoteRow> for NoteRecord {
    type Error = NotesError;

    fn try_from(row: NoteRow) -> Result<Self> {
        let id = NoteId::new(row.id)
            .map_err(|_| NotesError::Storage(format!("Invalid note id in database: {}", row.id)))?;
        let timestamp = parse_timestamp(&row.timestamp, "timestamp")?;
        let deleted_at = row
            .deleted_at
            .as_deref()
            .map(|value| parse_timestamp(value, "deleted_at"))
            .transpose()?;

        Ok(NoteRecord {
            id,
            title: row.title,
            content: row.content,
            timestamp,
            deleted: row.deleted,
            deleted_at,
        })
    }
}
