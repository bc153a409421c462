use clap::{Args, Parser, Subcommand};

use termnotes_core::VERSION;

/// termnotes - encrypted notes from the terminal
#[derive(Parser)]
#[command(name = "termnotes")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the notes database
    #[arg(short, long, global = true, env = "TERMNOTES_PATH")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the notes database, key and config
    Init(InitArgs),

    /// Add a new note
    Add(AddArgs),

    /// List notes
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a note by id
    Show(ShowArgs),

    /// Replace the content of a note
    Edit(EditArgs),

    /// Move a note to the trash (undoable)
    #[command(visible_alias = "rm")]
    Delete(IdArgs),

    /// Permanently delete a note
    Purge(IdArgs),

    /// Restore the most recently deleted note
    Undo,

    /// Restore a deleted note by id, or the most recent one
    Restore(RestoreArgs),

    /// List deleted notes, most recent first
    Trash(JsonArgs),

    /// Search note content (case-insensitive)
    Search(SearchArgs),

    /// Export active notes as JSON
    Export(ExportArgs),

    /// Import notes from a JSON export
    Import(ImportArgs),

    /// Permanently delete every note
    Clear(ClearArgs),

    /// Check database integrity and that every note decrypts
    Check,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Key file path (defaults to the database path with a .key extension)
    #[arg(long)]
    pub key_path: Option<String>,

    /// Config path override
    #[arg(long)]
    pub config_path: Option<String>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Note content
    #[arg(value_name = "CONTENT", num_args = 1.., required = true)]
    pub content: Vec<String>,

    /// Optional title
    #[arg(short, long)]
    pub title: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Include deleted notes
    #[arg(long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Note id
    #[arg(value_name = "ID")]
    pub id: String,

    /// New content
    #[arg(value_name = "CONTENT", num_args = 1.., required = true)]
    pub content: Vec<String>,

    /// New title (omit to clear)
    #[arg(short, long)]
    pub title: Option<String>,
}

/// A single note id
#[derive(Args)]
pub struct IdArgs {
    /// Note id
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `restore` command
#[derive(Args)]
pub struct RestoreArgs {
    /// Note id (defaults to the most recently deleted note)
    #[arg(value_name = "ID")]
    pub id: Option<String>,
}

/// Output format flag only
#[derive(Args)]
pub struct JsonArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    #[arg(value_name = "QUERY", num_args = 0..)]
    pub query: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout ("-" for stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Write to terminal-notes-backup-<date>.json in the current directory
    #[arg(long, conflicts_with = "output")]
    pub backup: bool,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// JSON file to import ("-" reads stdin)
    #[arg(value_name = "FILE")]
    pub file: String,
}

/// Arguments for the `clear` command
#[derive(Args)]
pub struct ClearArgs {
    /// Confirm permanent deletion of every note
    #[arg(long)]
    pub yes: bool,
}
