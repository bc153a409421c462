//! Normalization of caller-supplied note ids.
//!
//! Callers hand over ids typed at a command line as often as integers. Every
//! public notebook operation accepts either and converts once, here.

use crate::error::{NotesError, Result};
use crate::storage::NoteId;

/// Anything that can name a note: integers or their decimal string form.
pub trait IntoNoteId {
    fn into_note_id(self) -> Result<NoteId>;
}

impl IntoNoteId for NoteId {
    fn into_note_id(self) -> Result<NoteId> {
        Ok(self)
    }
}

impl IntoNoteId for &str {
    fn into_note_id(self) -> Result<NoteId> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return Err(NotesError::Usage("Note id is required".to_string()));
        }
        let raw: i64 = trimmed
            .parse()
            .map_err(|_| NotesError::Usage(format!("Invalid note id: {:?}", self)))?;
        NoteId::new(raw)
    }
}

impl IntoNoteId for &String {
    fn into_note_id(self) -> Result<NoteId> {
        self.as_str().into_note_id()
    }
}

impl IntoNoteId for String {
    fn into_note_id(self) -> Result<NoteId> {
        self.as_str().into_note_id()
    }
}

macro_rules! impl_into_note_id_for_int {
    ($($ty:ty),*) => {
        $(
            impl IntoNoteId for $ty {
                fn into_note_id(self) -> Result<NoteId> {
                    let raw = i64::try_from(self)
                        .map_err(|_| NotesError::Usage(format!("Note id out of range: {}", self)))?;
                    NoteId::new(raw)
                }
            }
        )*
    };
}

impl_into_note_id_for_int!(i32, i64, u32, u64, usize);
