// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// An HTTP resource service for bookmarks
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Turn debugging information on (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Disable colored log output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Socket address to listen on, e.g. 127.0.0.1:8000
        #[arg(long = "bind", value_name = "ADDR")]
        bind: Option<String>,

        /// Path to the SQLite database file
        #[arg(long = "db-url", value_name = "PATH")]
        db_url: Option<String>,
    },
    /// Create a new, empty database
    CreateDb {
        /// Path of the database file to create
        path: String,
    },
    /// Print the effective configuration as TOML
    ShowConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn given_cli_command_when_verify_then_debug_asserts_pass() {
        Cli::command().debug_assert()
    }

    #[test]
    fn given_no_subcommand_when_parse_then_command_is_none() {
        let cli = Cli::try_parse_from(["bookmarks-api", "-dd"]).unwrap();

        assert_eq!(cli.debug, 2);
        assert!(cli.command.is_none());
    }

    #[test]
    fn given_serve_flags_when_parse_then_captured() {
        let cli = Cli::try_parse_from([
            "bookmarks-api",
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--db-url",
            "/tmp/b.db",
            "--config",
            "/etc/bookmarks.toml",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                bind: Some("0.0.0.0:9000".to_string()),
                db_url: Some("/tmp/b.db".to_string()),
            })
        );
        assert_eq!(cli.config, Some(PathBuf::from("/etc/bookmarks.toml")));
    }

    #[test]
    fn given_create_db_without_path_when_parse_then_error() {
        assert!(Cli::try_parse_from(["bookmarks-api", "create-db"]).is_err());
    }
}
