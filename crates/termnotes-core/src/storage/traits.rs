//! Record store trait definition.
//!
//! The `RecordStore` trait is the persistence seam under a notebook. It only
//! ever sees stored envelope strings; encryption happens above it.

use super::types::{NewRecord, NoteId, NoteRecord, RecordScope, StoreMetadata};
use crate::error::Result;

/// Persistent table of note records keyed by integer id.
///
/// All implementations must ensure:
/// - Ids increase monotonically and are never reused, even after removal
/// - Each method is atomic (one transaction)
/// - Unknown ids are reported through `Option`/`bool`, never as errors
pub trait RecordStore: Send + Sync {
    /// Insert a new active record and return it with its assigned id.
    fn insert(&self, record: &NewRecord) -> Result<NoteRecord>;

    /// Fetch a record by id, active or deleted.
    fn fetch(&self, id: NoteId) -> Result<Option<NoteRecord>>;

    /// Replace title and content of an active record.
    ///
    /// Returns the updated record, or `None` if no active record has this id.
    fn update_content(
        &self,
        id: NoteId,
        title: Option<&str>,
        content: &str,
    ) -> Result<Option<NoteRecord>>;

    /// Mark an active record deleted. Returns `false` if absent or already deleted.
    fn soft_delete(&self, id: NoteId) -> Result<bool>;

    /// Mark a deleted record active. Returns `false` if absent or not deleted.
    fn restore(&self, id: NoteId) -> Result<bool>;

    /// Restore the most recently soft-deleted record, if any.
    fn restore_latest(&self) -> Result<Option<NoteId>>;

    /// Permanently remove a record. Returns `false` if absent.
    fn remove(&self, id: NoteId) -> Result<bool>;

    /// Permanently remove every record, returning how many were removed.
    fn remove_all(&self) -> Result<usize>;

    /// List records in the given scope.
    ///
    /// `Active` and `All` are in insertion order; `Deleted` is most recently
    /// deleted first.
    fn list(&self, scope: RecordScope) -> Result<Vec<NoteRecord>>;

    /// Get store metadata.
    fn metadata(&self) -> Result<StoreMetadata>;

    /// Check the physical integrity of the underlying medium.
    fn check_integrity(&self) -> Result<()>;
}
