//! CLI command implementations.

pub mod config;
pub mod prices;
pub mod tree;

use clap::{Args, Subcommand};

/// Arguments for the tree command.
#[derive(Args)]
pub struct TreeArgs {
    /// Cart snapshot (JSON as returned by the cart query).
    pub snapshot: String,

    /// List the sizes each line can be swapped to.
    #[arg(long)]
    pub sizes: bool,
}

/// Arguments for the prices command.
#[derive(Args)]
pub struct PricesArgs {
    /// Cart snapshot (JSON as returned by the cart query).
    pub snapshot: String,

    /// Hide the compare-at price when a discount is in another currency.
    #[arg(long)]
    pub strict_currency: bool,
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
    /// Validate the config file.
    Validate,
}
