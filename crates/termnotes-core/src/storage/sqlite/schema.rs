//! Schema creation and upgrades, tracked with `PRAGMA user_version`.

use chrono::{SecondsFormat, Utc};
use log::info;
use rusqlite::Connection;

use crate::error::{NotesError, Result};

/// Schema version written by this build.
pub const SCHEMA_VERSION: i64 = 2;

/// Version 1: the original notes table, content only, no soft delete.
const V1: &str = r#"
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT,
        content TEXT NOT NULL,
        timestamp TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS notes_timestamp ON notes (timestamp);
"#;

/// Version 2: soft delete with a total deletion order for undo.
const V2: &str = r#"
    ALTER TABLE notes ADD COLUMN deleted INTEGER NOT NULL DEFAULT 0;
    ALTER TABLE notes ADD COLUMN deleted_at TEXT;
    ALTER TABLE notes ADD COLUMN deletion_seq INTEGER;

    CREATE INDEX notes_deleted ON notes (deleted, deletion_seq);
"#;

const MIGRATIONS: [&str; 2] = [V1, V2];

pub fn user_version(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Bring the database up to [`SCHEMA_VERSION`].
///
/// Each pending step runs in its own transaction together with the
/// version bump, so a failed upgrade leaves the previous version intact.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    let current = user_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(NotesError::Storage(format!(
            "Database schema version {} is newer than supported version {}",
            current, SCHEMA_VERSION
        )));
    }

    for (index, step) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        let target = index as i64 + 1;
        let tx = conn.transaction()?;
        tx.execute_batch(step)?;
        tx.pragma_update(None, "user_version", target)?;
        tx.commit()?;
        if current > 0 {
            info!("Upgraded notes database to schema version {}", target);
        }
    }

    conn.execute(
        "INSERT OR IGNORE INTO meta (key, value) VALUES ('created_at', ?)",
        [Utc::now().to_rfc3339_opts(SecondsFormat::AutoSi, true)],
    )?;

    Ok(())
}
