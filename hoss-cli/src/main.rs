//! hossctl
//!
//! Command-line interface for the HOSS App Pack. Runs fabric validation
//! rituals on the Demon platform.

mod commands;
mod config;
mod duration;

use std::process::ExitCode;

use clap::Parser;
use colored::*;
use commands::{Commands, Verdict, handle_command};
use config::Config;
use hoss_client::config::DEFAULT_BASE_URL;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hossctl", version)]
#[command(about = "HOSS CLI for Demon App Pack", long_about = None)]
struct Cli {
    /// Demon API endpoint
    #[arg(long, global = true, env = "DEMON_URL", default_value = DEFAULT_BASE_URL)]
    demon_url: String,

    /// Demon API authentication token
    #[arg(long, global = true, env = "DEMON_TOKEN", hide_env_values = true)]
    demon_token: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hossctl=warn,hoss_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::new(cli.demon_url, cli.demon_token, cli.json);

    match handle_command(cli.command, &config).await {
        Ok(verdict) => {
            if let Verdict::Fail(reason) = &verdict {
                eprintln!("{} {}", "Error:".red().bold(), reason);
            }
            ExitCode::from(verdict.exit_code())
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
