//! Read-side queries over decrypted notes.

use super::Notebook;
use crate::error::Result;
use crate::storage::{Listing, RecordScope};

impl Notebook {
    /// Case-insensitive substring search over the content of active notes.
    ///
    /// There is no index: every active note is decrypted and scanned. An
    /// empty or whitespace-only query matches nothing.
    pub fn search(&self, query: &str) -> Result<Listing> {
        if query.trim().is_empty() {
            return Ok(Listing::default());
        }
        let needle = query.to_lowercase();
        let records = self.records.list(RecordScope::Active)?;
        self.open_records(records, |note| {
            note.content.to_lowercase().contains(&needle)
        })
    }

    /// Soft-deleted notes, most recently deleted first.
    ///
    /// The head of this list is what [`Notebook::undo`] restores.
    pub fn get_deleted(&self) -> Result<Listing> {
        let records = self.records.list(RecordScope::Deleted)?;
        self.open_records(records, |_| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Notebook {
        let nb = Notebook::open_in_memory().unwrap();
        nb.add("Buy MILK and eggs", None).unwrap();
        nb.add("Call Bob about the milkshake", Some("calls")).unwrap();
        nb.add("Dentist on Friday", None).unwrap();
        nb
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let nb = seeded();
        let hits = nb.search("milk").unwrap();
        assert_eq!(hits.ids().iter().map(|id| id.get()).collect::<Vec<_>>(), vec![1, 2]);

        let hits = nb.search("DENTIST").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.notes[0].content, "Dentist on Friday");
    }

    #[test]
    fn test_search_ignores_titles() {
        let nb = seeded();
        assert!(nb.search("calls").unwrap().is_empty());
    }

    #[test]
    fn test_search_no_match_and_empty_query() {
        let nb = seeded();
        assert!(nb.search("zebra").unwrap().is_empty());
        assert!(nb.search("").unwrap().is_empty());
        assert!(nb.search("   ").unwrap().is_empty());
    }

    #[test]
    fn test_search_skips_deleted_notes() {
        let nb = seeded();
        nb.soft_delete(1).unwrap();
        let hits = nb.search("milk").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.notes[0].id.get(), 2);
    }

    #[test]
    fn test_deleted_listing_is_most_recent_first() {
        let nb = seeded();
        nb.soft_delete(2).unwrap();
        nb.soft_delete(3).unwrap();
        nb.soft_delete(1).unwrap();

        let deleted = nb.get_deleted().unwrap();
        let ids: Vec<i64> = deleted.ids().iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert!(deleted.iter().all(|note| note.deleted));

        let undone = nb.undo().unwrap().unwrap();
        assert_eq!(undone.id(), deleted.notes[0].id);
    }
}
