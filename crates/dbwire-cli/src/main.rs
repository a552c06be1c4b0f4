// crates/dbwire-cli/src/main.rs
// ============================================================================
// Module: dbwire CLI Entry Point
// Description: Command dispatcher for validation and provisioning runs.
// Purpose: Provide a safe, localized CLI over the dbwire provisioner.
// Dependencies: clap, dbwire-core, dbwire-config, dbwire-providers, serde_json
// ============================================================================

//! ## Overview
//! The dbwire CLI validates provisioning configuration and runs the
//! provisioning pipeline against the local reference collaborators. Exports
//! are written to the configured file sink or emitted on stdout as JSON; all
//! output is routed through explicit writers.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use dbwire_config::ProvisionConfig;
use dbwire_core::ExportSink;
use dbwire_core::ProvisionOutcome;
use dbwire_core::ProvisionPlan;
use dbwire_core::ProvisionRequest;
use dbwire_core::Provisioner;
use dbwire_providers::JsonExportSink;
use dbwire_providers::LocalCreatorConfig;
use dbwire_providers::LocalProjectServiceBinder;
use dbwire_providers::LocalResourceCreator;
use dbwire_providers::MemoryExportSink;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "dbwire", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate configuration and report the resolved plan.
    Validate(ValidateCommand),
    /// Run the provisioning pipeline and publish exports.
    Provision(ProvisionCommand),
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for the `provision` subcommand.
#[derive(Args, Debug)]
struct ProvisionCommand {
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Export file path overriding `[exports].path`.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Validate(command) => command_validate(&command),
        Commands::Provision(command) => command_provision(&command),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Validates configuration and reports the resolved plan.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let request = load_request(command.config.as_deref())?;
    let plan =
        ProvisionPlan::resolve(&request).map_err(|err| CliError::new(err.to_string()))?;
    write_json_line(&plan)?;
    Ok(ExitCode::SUCCESS)
}

/// Runs the provisioning pipeline and publishes exports.
fn command_provision(command: &ProvisionCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let request = config.to_request().map_err(|err| CliError::new(err.to_string()))?;
    let out_path = command.out.clone().or_else(|| config.exports.path.clone());
    let outcome = match out_path {
        Some(path) => run_pipeline(&request, JsonExportSink::new(path))?,
        None => run_pipeline(&request, MemoryExportSink::new())?,
    };
    write_json_line(&outcome)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Pipeline Helpers
// ============================================================================

/// Loads configuration from the resolved path.
fn load_config(path: Option<&std::path::Path>) -> CliResult<ProvisionConfig> {
    ProvisionConfig::load(path).map_err(|err| CliError::new(err.to_string()))
}

/// Loads configuration and converts it into a provisioning request.
fn load_request(path: Option<&std::path::Path>) -> CliResult<ProvisionRequest> {
    let config = load_config(path)?;
    config.to_request().map_err(|err| CliError::new(err.to_string()))
}

/// Runs the provisioner with the local collaborators and the given sink.
fn run_pipeline<S: ExportSink>(
    request: &ProvisionRequest,
    sink: S,
) -> CliResult<ProvisionOutcome> {
    let provisioner = Provisioner::new(
        LocalProjectServiceBinder::new(),
        LocalResourceCreator::new(LocalCreatorConfig::default()),
        sink,
    );
    provisioner.provision(request).map_err(|err| CliError::new(err.to_string()))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a value to stdout as a single pretty-printed JSON document.
fn write_json_line<T: Serialize>(value: &T) -> CliResult<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))?;
    write_stdout_line(&payload)
        .map_err(|err| CliError::new(format!("failed to write stdout: {err}")))
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Reports an error on stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
