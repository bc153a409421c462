//! termnotes CLI - encrypted notes from the terminal
//!
//! This is the command-line interface for termnotes. It resolves where the
//! store lives, opens it, and hands each subcommand to its handler.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod output;
mod ui;

use clap::Parser;
use log::debug;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{maintenance, notes, transfer};
use crate::constants::DEFAULT_DATE_FORMAT;
use crate::errors::{exit_code_for, hint_for};
use crate::ui::{print_error, UiContext};

/// Install the logger. `RUST_LOG` wins over the flag-derived default.
fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();
}

fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    let ctx = AppContext::new(&cli);
    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = UiContext::from_env(false, DEFAULT_DATE_FORMAT.to_string());
        let message = format!("{:#}", e);
        print_error(&ui_ctx, &message, hint_for(&e));
        std::process::exit(exit_code_for(&e));
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Init(args) => maintenance::handle_init(ctx, args)?,
        Commands::Add(args) => notes::handle_add(ctx, args)?,
        Commands::List(args) => notes::handle_list(ctx, args)?,
        Commands::Show(args) => notes::handle_show(ctx, args)?,
        Commands::Edit(args) => notes::handle_edit(ctx, args)?,
        Commands::Delete(args) => notes::handle_delete(ctx, args)?,
        Commands::Purge(args) => notes::handle_purge(ctx, args)?,
        Commands::Undo => notes::handle_undo(ctx)?,
        Commands::Restore(args) => notes::handle_restore(ctx, args)?,
        Commands::Trash(args) => notes::handle_trash(ctx, args)?,
        Commands::Search(args) => notes::handle_search(ctx, args)?,
        Commands::Export(args) => transfer::handle_export(ctx, args)?,
        Commands::Import(args) => transfer::handle_import(ctx, args)?,
        Commands::Clear(args) => maintenance::handle_clear(ctx, args)?,
        Commands::Check => maintenance::handle_check(ctx)?,
    }
    debug!("Command finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_multi_word_content() {
        let cli = Cli::try_parse_from(["termnotes", "add", "Buy", "milk", "--title", "Groceries"])
            .unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.content.join(" "), "Buy milk");
                assert_eq!(args.title.as_deref(), Some("Groceries"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_restore_id_is_optional() {
        let cli = Cli::try_parse_from(["termnotes", "restore"]).unwrap();
        assert!(matches!(cli.command, Commands::Restore(ref a) if a.id.is_none()));

        let cli = Cli::try_parse_from(["termnotes", "restore", "4"]).unwrap();
        assert!(matches!(cli.command, Commands::Restore(ref a) if a.id.as_deref() == Some("4")));
    }

    #[test]
    fn test_export_output_conflicts_with_backup() {
        assert!(Cli::try_parse_from(["termnotes", "export", "--backup", "-o", "x.json"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["termnotes", "list", "--store", "/tmp/n.db", "-q"]).unwrap();
        assert_eq!(cli.store.as_deref(), Some("/tmp/n.db"));
        assert!(cli.quiet);
    }
}
