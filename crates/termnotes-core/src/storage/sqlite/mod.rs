//! SQLite record store backend.
//!
//! Note rows live in a single `notes` table with `AUTOINCREMENT` ids, so
//! SQLite itself guarantees an id is never handed out twice. Content
//! columns hold envelope strings produced by the crypto layer.

mod row;
pub mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use rusqlite::{Connection, OptionalExtension};

use crate::error::{NotesError, Result};
use crate::storage::traits::RecordStore;
use crate::storage::types::{NewRecord, NoteId, NoteRecord, RecordScope, StoreMetadata};

use row::{NoteRow, NOTE_COLUMNS};

pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// SQLite-backed record store.
pub struct SqliteRecordStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Open (or create) a database file and bring its schema up to date.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    NotesError::Storage(format!(
                        "Failed to create store directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let conn = Connection::open(path)?;
        debug!("Opened notes database at {}", path.display());
        Self::from_connection(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, None)
    }

    fn from_connection(mut conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        schema::migrate(&mut conn)?;
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Database file path, or `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| NotesError::Storage("SQLite connection poisoned".to_string()))
    }

    fn fetch_with(conn: &Connection, id: NoteId) -> Result<Option<NoteRecord>> {
        let row = conn
            .query_row(
                &format!("SELECT {} FROM notes WHERE id = ?", NOTE_COLUMNS),
                [id.get()],
                NoteRow::from_row,
            )
            .optional()?;
        row.map(NoteRecord::try_from).transpose()
    }

    fn count_where(conn: &Connection, deleted: bool) -> Result<usize> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE deleted = ?",
            [deleted],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

impl RecordStore for SqliteRecordStore {
    fn insert(&self, record: &NewRecord) -> Result<NoteRecord> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO notes (title, content, timestamp, deleted) VALUES (?, ?, ?, 0)",
            (
                record.title.as_deref(),
                record.content.as_str(),
                format_timestamp(&record.timestamp),
            ),
        )?;
        let id = NoteId::new(tx.last_insert_rowid())?;
        let inserted = Self::fetch_with(&tx, id)?
            .ok_or_else(|| NotesError::Storage("Inserted note vanished".to_string()))?;

        tx.commit()?;
        Ok(inserted)
    }

    fn fetch(&self, id: NoteId) -> Result<Option<NoteRecord>> {
        let conn = self.lock_conn()?;
        Self::fetch_with(&conn, id)
    }

    fn update_content(
        &self,
        id: NoteId,
        title: Option<&str>,
        content: &str,
    ) -> Result<Option<NoteRecord>> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let changed = tx.execute(
            "UPDATE notes SET title = ?, content = ? WHERE id = ? AND deleted = 0",
            (title, content, id.get()),
        )?;
        if changed == 0 {
            return Ok(None);
        }
        let updated = Self::fetch_with(&tx, id)?;

        tx.commit()?;
        Ok(updated)
    }

    fn soft_delete(&self, id: NoteId) -> Result<bool> {
        let conn = self.lock_conn()?;
        let changed = conn.execute(
            r#"
            UPDATE notes
            SET deleted = 1,
                deleted_at = ?,
                deletion_seq = (SELECT COALESCE(MAX(deletion_seq), 0) + 1 FROM notes)
            WHERE id = ? AND deleted = 0
            "#,
            (format_timestamp(&Utc::now()), id.get()),
        )?;
        Ok(changed > 0)
    }

    fn restore(&self, id: NoteId) -> Result<bool> {
        let conn = self.lock_conn()?;
        let changed = conn.execute(
            "UPDATE notes SET deleted = 0, deleted_at = NULL, deletion_seq = NULL WHERE id = ? AND deleted = 1",
            [id.get()],
        )?;
        Ok(changed > 0)
    }

    fn restore_latest(&self) -> Result<Option<NoteId>> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let latest: Option<i64> = tx
            .query_row(
                "SELECT id FROM notes WHERE deleted = 1 ORDER BY deletion_seq DESC, id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        let Some(raw_id) = latest else {
            return Ok(None);
        };
        tx.execute(
            "UPDATE notes SET deleted = 0, deleted_at = NULL, deletion_seq = NULL WHERE id = ?",
            [raw_id],
        )?;

        tx.commit()?;
        Ok(Some(NoteId::new(raw_id)?))
    }

    fn remove(&self, id: NoteId) -> Result<bool> {
        let conn = self.lock_conn()?;
        let changed = conn.execute("DELETE FROM notes WHERE id = ?", [id.get()])?;
        Ok(changed > 0)
    }

    fn remove_all(&self) -> Result<usize> {
        let conn = self.lock_conn()?;
        // Plain DELETE keeps the sqlite_sequence row, so ids continue after a clear.
        Ok(conn.execute("DELETE FROM notes", [])?)
    }

    fn list(&self, scope: RecordScope) -> Result<Vec<NoteRecord>> {
        let conn = self.lock_conn()?;

        let filter = match scope {
            RecordScope::Active => "WHERE deleted = 0 ORDER BY id ASC",
            RecordScope::Deleted => "WHERE deleted = 1 ORDER BY deletion_seq DESC, id DESC",
            RecordScope::All => "ORDER BY id ASC",
        };
        let mut stmt = conn.prepare(&format!("SELECT {} FROM notes {}", NOTE_COLUMNS, filter))?;
        let rows = stmt.query_map([], NoteRow::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.try_into()?);
        }
        Ok(records)
    }

    fn metadata(&self) -> Result<StoreMetadata> {
        let conn = self.lock_conn()?;

        let created_at_str: String = conn.query_row(
            "SELECT value FROM meta WHERE key = 'created_at'",
            [],
            |row| row.get(0),
        )?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| NotesError::Storage(format!("Invalid created_at timestamp: {}", e)))?
            .with_timezone(&Utc);

        Ok(StoreMetadata {
            schema_version: schema::user_version(&conn)?,
            created_at,
            active_notes: Self::count_where(&conn, false)?,
            deleted_notes: Self::count_where(&conn, true)?,
        })
    }

    fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if result != "ok" {
            return Err(NotesError::Storage(format!(
                "SQLite integrity check failed: {}",
                result
            )));
        }

        let version = schema::user_version(&conn)?;
        if version != schema::SCHEMA_VERSION {
            return Err(NotesError::Storage(format!(
                "Unexpected schema version {} (expected {})",
                version,
                schema::SCHEMA_VERSION
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(content: &str) -> NewRecord {
        NewRecord {
            title: None,
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }

    fn id(raw: i64) -> NoteId {
        NoteId::new(raw).unwrap()
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        let first = store.insert(&record("a")).unwrap();
        let second = store.insert(&record("b")).unwrap();
        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
        assert!(!first.deleted);
    }

    #[test]
    fn test_ids_not_reused_after_remove_or_clear() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        store.insert(&record("a")).unwrap();
        let second = store.insert(&record("b")).unwrap();
        assert!(store.remove(second.id).unwrap());

        let third = store.insert(&record("c")).unwrap();
        assert_eq!(third.id.get(), 3);

        assert_eq!(store.remove_all().unwrap(), 2);
        let fourth = store.insert(&record("d")).unwrap();
        assert_eq!(fourth.id.get(), 4);
    }

    #[test]
    fn test_soft_delete_and_restore_flags() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        let note = store.insert(&record("a")).unwrap();

        assert!(store.soft_delete(note.id).unwrap());
        assert!(!store.soft_delete(note.id).unwrap());
        let fetched = store.fetch(note.id).unwrap().unwrap();
        assert!(fetched.deleted);
        assert!(fetched.deleted_at.is_some());

        assert!(store.restore(note.id).unwrap());
        assert!(!store.restore(note.id).unwrap());
        let fetched = store.fetch(note.id).unwrap().unwrap();
        assert!(!fetched.deleted);
        assert!(fetched.deleted_at.is_none());

        assert!(!store.soft_delete(id(99)).unwrap());
        assert!(!store.restore(id(99)).unwrap());
    }

    #[test]
    fn test_deleted_scope_orders_by_deletion() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        let a = store.insert(&record("a")).unwrap();
        let b = store.insert(&record("b")).unwrap();
        let c = store.insert(&record("c")).unwrap();

        store.soft_delete(b.id).unwrap();
        store.soft_delete(a.id).unwrap();
        store.soft_delete(c.id).unwrap();

        let deleted: Vec<i64> = store
            .list(RecordScope::Deleted)
            .unwrap()
            .iter()
            .map(|r| r.id.get())
            .collect();
        assert_eq!(deleted, vec![3, 1, 2]);
    }

    #[test]
    fn test_restore_latest_walks_deletion_order() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        let a = store.insert(&record("a")).unwrap();
        let b = store.insert(&record("b")).unwrap();
        store.soft_delete(b.id).unwrap();
        store.soft_delete(a.id).unwrap();

        assert_eq!(store.restore_latest().unwrap(), Some(a.id));
        assert_eq!(store.restore_latest().unwrap(), Some(b.id));
        assert_eq!(store.restore_latest().unwrap(), None);
    }

    #[test]
    fn test_update_content_skips_deleted() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        let note = store.insert(&record("a")).unwrap();

        let updated = store
            .update_content(note.id, Some("Title"), "b")
            .unwrap()
            .unwrap();
        assert_eq!(updated.content, "b");
        assert_eq!(updated.title.as_deref(), Some("Title"));
        assert_eq!(updated.timestamp, note.timestamp);

        store.soft_delete(note.id).unwrap();
        assert!(store.update_content(note.id, None, "c").unwrap().is_none());
        assert!(store.update_content(id(42), None, "c").unwrap().is_none());
    }

    #[test]
    fn test_metadata_counts() {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        let a = store.insert(&record("a")).unwrap();
        store.insert(&record("b")).unwrap();
        store.soft_delete(a.id).unwrap();

        let meta = store.metadata().unwrap();
        assert_eq!(meta.schema_version, schema::SCHEMA_VERSION);
        assert_eq!(meta.active_notes, 1);
        assert_eq!(meta.deleted_notes, 1);
        store.check_integrity().unwrap();
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("notes.db");
        {
            let store = SqliteRecordStore::open(&path).unwrap();
            store.insert(&record("kept")).unwrap();
        }
        let reopened = SqliteRecordStore::open(&path).unwrap();
        assert_eq!(reopened.path(), Some(path.as_path()));
        let all = reopened.list(RecordScope::All).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, "kept");
    }
}
