//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and by clap for usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure (storage, I/O).
    pub const FAILURE: i32 = 1;

    /// Note not found (or nothing to undo).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input: bad id, empty content, malformed import payload.
    pub const INVALID_INPUT: i32 = 4;

    /// Integrity check failed or a note could not be decrypted.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Default timestamp format for human-readable output.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Characters of content shown per row in list views.
pub const PREVIEW_CHARS: usize = 60;
