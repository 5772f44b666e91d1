//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod validate;

pub use validate::{ValidateArgs, Verdict};

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate a Hedgehog fabric wiring diagram
    ///
    /// The diagram is sent to the Demon platform, which runs the
    /// hoss-validate ritual and returns a JSON envelope.
    Validate(ValidateArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Returns
/// The verdict to report, or an error that prevented reaching one
pub async fn handle_command(command: Commands, config: &Config) -> Result<Verdict> {
    match command {
        Commands::Validate(args) => validate::handle_validate(args, config).await,
    }
}
