//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod replay;
pub mod shop;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show products whose name contains this text (case-insensitive).
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Save the session as a recording when it ends.
    #[arg(short, long)]
    pub record: Option<String>,
}

/// Arguments for the replay command.
#[derive(Args)]
pub struct ReplayArgs {
    #[command(subcommand)]
    pub command: ReplayCommand,
}

#[derive(Subcommand)]
pub enum ReplayCommand {
    /// Replay a recording and print the resulting cart.
    Play {
        /// Recording file.
        recording: String,

        /// Fail if the cart differs from the recording's expected cart.
        #[arg(long)]
        strict: bool,
    },
    /// List the events in a recording.
    Show {
        /// Recording file.
        recording: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file and the catalog it points to.
    Validate,
}
