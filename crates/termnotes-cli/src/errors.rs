//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes. Core errors are classified here
//! as well so every failure path leaves through [`exit_code_for`].

use std::fmt;

use termnotes_core::NotesError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (note, undo target)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// Integrity check reported problems
    IntegrityFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::IntegrityFailed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Create an IntegrityFailed error.
    pub fn integrity_failed(message: impl Into<String>) -> Self {
        CliError::IntegrityFailed(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
        }
    }
}

/// Exit code for an error that reached `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    match err.downcast_ref::<NotesError>() {
        Some(notes_err) if notes_err.is_usage() => exit_codes::INVALID_INPUT,
        Some(NotesError::Crypto(_)) => exit_codes::INTEGRITY_FAILED,
        _ => exit_codes::FAILURE,
    }
}

/// Hint shown under an error, if one applies.
pub fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    if let Some(CliError::NotFound { .. }) = err.downcast_ref::<CliError>() {
        return None;
    }
    match err.downcast_ref::<NotesError>() {
        Some(NotesError::Usage(message)) if message.to_lowercase().contains("note id") => {
            Some("Note ids are positive integers. Run `termnotes list` to see them.")
        }
        Some(NotesError::Usage(message)) if message.contains("content") => {
            Some("Pass the note text as arguments, e.g. `termnotes add Buy milk`.")
        }
        Some(NotesError::Format(_)) => Some("Import expects a JSON array as written by `termnotes export`."),
        Some(NotesError::Crypto(_)) => {
            Some("The key file may not match this database. Run `termnotes check` for details.")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_exit_codes() {
        assert_eq!(
            CliError::not_found("Note 9 not found", "hint").exit_code(),
            exit_codes::NOT_FOUND
        );
        assert_eq!(
            CliError::invalid_input("bad").exit_code(),
            exit_codes::INVALID_INPUT
        );
        assert_eq!(
            CliError::integrity_failed("bad").exit_code(),
            exit_codes::INTEGRITY_FAILED
        );
    }

    #[test]
    fn test_core_errors_are_classified() {
        let usage = anyhow::Error::new(NotesError::Usage("Invalid note id".into()));
        assert_eq!(exit_code_for(&usage), exit_codes::INVALID_INPUT);
        assert!(hint_for(&usage).is_some());

        let format = anyhow::Error::new(NotesError::Format("not an array".into()));
        assert_eq!(exit_code_for(&format), exit_codes::INVALID_INPUT);

        let crypto = anyhow::Error::new(NotesError::Crypto("authentication failed".into()));
        assert_eq!(exit_code_for(&crypto), exit_codes::INTEGRITY_FAILED);

        let other = anyhow::anyhow!("disk on fire");
        assert_eq!(exit_code_for(&other), exit_codes::FAILURE);
        assert!(hint_for(&other).is_none());
    }

    #[test]
    fn test_usage_hint_matches_the_problem() {
        let bad_id = anyhow::Error::new(NotesError::Usage("Invalid note id: \"abc\"".into()));
        assert!(hint_for(&bad_id).unwrap().contains("ids are positive integers"));

        let range = anyhow::Error::new(NotesError::Usage(
            "Note id must be a positive integer (got 0)".into(),
        ));
        assert!(hint_for(&range).unwrap().contains("ids are positive integers"));

        let empty = anyhow::Error::new(NotesError::Usage("Note content cannot be empty".into()));
        let hint = hint_for(&empty).unwrap();
        assert!(!hint.contains("ids"));
        assert!(hint.contains("termnotes add"));

        let other = anyhow::Error::new(NotesError::Usage("something else".into()));
        assert!(hint_for(&other).is_none());
    }

    #[test]
    fn test_not_found_display_includes_hint() {
        let err = CliError::not_found("Note 4 not found", "Hint: Run `termnotes list`.");
        assert_eq!(err.to_string(), "Note 4 not found\nHint: Run `termnotes list`.");
    }
}
