//! Validate command handler
//!
//! Sends a fabric wiring diagram to the `hoss-validate` ritual, waits for
//! the result envelope and turns its status into a verdict.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args};
use colored::*;
use hoss_client::{DemonClient, Envelope, EnvelopeStatus};
use hoss_core::dto::ritual::RitualInput;
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::duration::parse_duration;

/// Ritual that validates wiring diagrams
pub const VALIDATE_RITUAL: &str = "hoss-validate";

/// Arguments of `hossctl validate`
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Wiring diagram to validate
    pub diagram: PathBuf,

    /// Enable strict validation (zero warnings allowed)
    #[arg(long)]
    pub strict: bool,

    /// Path to fab.yaml configuration file
    #[arg(long)]
    pub fab_config: Option<PathBuf>,

    /// Wait for validation to complete
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub wait: bool,

    /// Timeout for validation (e.g. 90s, 5m, 1m30s)
    #[arg(long, default_value = "5m", value_parser = parse_duration)]
    pub timeout: Duration,
}

/// Outcome of a validation, mapped onto the process exit code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(String),
}

impl Verdict {
    pub fn exit_code(&self) -> u8 {
        match self {
            Verdict::Pass => 0,
            Verdict::Fail(_) => 1,
        }
    }
}

/// Decide pass/fail from an envelope's status
///
/// `warning` only fails in strict mode. A missing or unknown status fails.
pub fn verdict(envelope: &Envelope, strict: bool) -> Verdict {
    let raw = match envelope.raw_status() {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Verdict::Fail("invalid envelope: missing status".to_string()),
    };

    match EnvelopeStatus::parse(raw) {
        Some(EnvelopeStatus::Ok) => Verdict::Pass,
        Some(EnvelopeStatus::Warning) if strict => {
            Verdict::Fail("validation warnings not allowed in strict mode".to_string())
        }
        Some(EnvelopeStatus::Warning) => Verdict::Pass,
        Some(EnvelopeStatus::Error) => Verdict::Fail("validation failed".to_string()),
        None => Verdict::Fail(format!("invalid envelope: unrecognized status {raw:?}")),
    }
}

/// What a validation prints on stdout and how it ends
#[derive(Debug)]
pub struct Outcome {
    pub output: String,
    pub verdict: Verdict,
}

/// Handle `hossctl validate`
pub async fn handle_validate(args: ValidateArgs, config: &Config) -> Result<Verdict> {
    let outcome = run_validate(args, config).await?;
    println!("{}", outcome.output);
    Ok(outcome.verdict)
}

/// Runs the validation ritual and renders its stdout output
async fn run_validate(args: ValidateArgs, config: &Config) -> Result<Outcome> {
    let diagram = existing_absolute(&args.diagram)?;
    let fab_config = args
        .fab_config
        .as_deref()
        .map(std::path::absolute)
        .transpose()
        .context("invalid fab config path")?;

    let client =
        DemonClient::new(config.client_config()).context("Failed to create Demon client")?;
    debug!(
        "Using Demon API at {} ({})",
        client.base_url(),
        if config.demon_token.is_some() { "authenticated" } else { "anonymous" }
    );
    let input = validation_input(&diagram, args.strict, fab_config.as_deref());

    if !config.json_output {
        eprintln!(
            "{} Starting validation for: {}",
            "▸".cyan(),
            args.diagram.display()
        );
        if args.strict {
            eprintln!("  Strict mode: {}", "enabled".yellow());
        }
    }

    let run_id = client
        .start_ritual(VALIDATE_RITUAL, input)
        .await
        .context("failed to start validation ritual")?;

    if !config.json_output {
        eprintln!("{} Ritual started: {}", "▸".cyan(), run_id.dimmed());
    }

    if !args.wait {
        return Ok(Outcome {
            output: json!({ "runId": run_id, "status": "started" }).to_string(),
            verdict: Verdict::Pass,
        });
    }

    if !config.json_output {
        eprintln!("{} Waiting for results...", "▸".cyan());
    }

    let envelope = client
        .wait_for_ritual(&run_id, args.timeout)
        .await
        .context("validation failed")?;

    let output =
        serde_json::to_string_pretty(&envelope).context("failed to marshal envelope")?;

    let verdict = verdict(&envelope, args.strict);
    if !config.json_output && verdict == Verdict::Pass {
        eprintln!("{} Validation passed", "✓".green());
    }

    Ok(Outcome { output, verdict })
}

/// Builds the ritual input document
fn validation_input(diagram: &Path, strict: bool, fab_config: Option<&Path>) -> RitualInput {
    let mut input = RitualInput::new();
    input.insert(
        "diagramPath".to_string(),
        json!(diagram.display().to_string()),
    );
    input.insert("strict".to_string(), json!(strict));
    if let Some(fab_config) = fab_config {
        input.insert(
            "fabConfigPath".to_string(),
            json!(fab_config.display().to_string()),
        );
    }
    input
}

/// Absolute form of `path`, which must exist
fn existing_absolute(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).context("invalid diagram path")?;
    if !absolute.exists() {
        bail!("diagram file not found: {}", absolute.display());
    }
    Ok(absolute)
}
