// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::config::Settings;

pub mod args;
pub mod commands;
pub mod error;

pub fn execute_command(cli: Cli, settings: Settings) -> CliResult<()> {
    match cli.command {
        Some(Commands::CreateDb { path }) => commands::create_db(&path),
        Some(Commands::ShowConfig) => commands::show_config(&settings),
        Some(Commands::Serve { bind, db_url }) => {
            let settings =
                commands::apply_serve_overrides(settings, bind.as_deref(), db_url.as_deref());
            commands::serve(&settings)
        }
        None => commands::serve(&settings),
    }
}
