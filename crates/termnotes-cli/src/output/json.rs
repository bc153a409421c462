//! JSON output formatting for notes.

use termnotes_core::storage::Listing;
use termnotes_core::Note;

/// Convert a note to JSON for output.
pub fn note_json(note: &Note) -> serde_json::Value {
    let mut value = serde_json::json!({
        "id": note.id,
        "title": note.title,
        "content": note.content,
        "timestamp": note.timestamp,
        "deleted": note.deleted,
    });
    if let Some(deleted_at) = note.deleted_at {
        value["deleted_at"] = serde_json::json!(deleted_at);
    }
    value
}

/// Convert a listing to JSON, keeping unreadable notes visible.
pub fn listing_json(listing: &Listing) -> serde_json::Value {
    serde_json::json!({
        "notes": listing.iter().map(note_json).collect::<Vec<_>>(),
        "unreadable": listing.unreadable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use termnotes_core::storage::UnreadableNote;
    use termnotes_core::NoteId;

    fn sample() -> Note {
        Note {
            id: NoteId::new(7).unwrap(),
            title: None,
            content: "Buy milk".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            deleted: false,
            deleted_at: None,
        }
    }

    #[test]
    fn test_note_json_fields() {
        let value = note_json(&sample());
        assert_eq!(value["id"], 7);
        assert_eq!(value["content"], "Buy milk");
        assert!(value["title"].is_null());
        assert_eq!(value["deleted"], false);
        assert!(value.get("deleted_at").is_none());
    }

    #[test]
    fn test_listing_json_reports_unreadable() {
        let listing = Listing {
            notes: vec![sample()],
            unreadable: vec![UnreadableNote {
                id: NoteId::new(8).unwrap(),
                reason: "authentication failed".to_string(),
            }],
        };
        let value = listing_json(&listing);
        assert_eq!(value["notes"].as_array().unwrap().len(), 1);
        assert_eq!(value["unreadable"][0]["id"], 8);
    }
}
