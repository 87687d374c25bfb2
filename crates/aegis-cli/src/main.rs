// crates/aegis-cli/src/main.rs
// ============================================================================
// Module: Aegis CLI Entry Point
// Description: Command dispatcher for the Aegis safety service.
// Purpose: Run the HTTP server, validate configuration, and raise test
//          emergencies against a running instance.
// Dependencies: aegis-client, aegis-config, aegis-server, clap, tokio
// ============================================================================

//! ## Overview
//! The Aegis CLI wraps the server and client crates behind three commands:
//! `serve` runs the HTTP API, `check-config` validates a configuration file
//! and reports, and `trigger` raises an emergency against a running server.
//! All output goes through explicit write helpers so stream failures are
//! surfaced instead of panicking.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use aegis_client::HttpTriggerApi;
use aegis_client::TriggerApi;
use aegis_config::AegisConfig;
use aegis_server::AegisServer;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "aegis", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Aegis HTTP server.
    Serve(ServeCommand),
    /// Validate a configuration file and report.
    CheckConfig(CheckConfigCommand),
    /// Raise an emergency against a running server.
    Trigger(TriggerCommand),
}

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: PathBuf,
    /// Override the configured bind address.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

/// Arguments for the `check-config` command.
#[derive(Args, Debug)]
struct CheckConfigCommand {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: PathBuf,
}

/// Arguments for the `trigger` command.
#[derive(Args, Debug)]
struct TriggerCommand {
    /// Base URL of the running server, e.g. `http://127.0.0.1:5000`.
    #[arg(long, value_name = "URL")]
    url: String,
    /// Latitude in decimal degrees.
    #[arg(long, value_name = "DEG")]
    latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[arg(long, value_name = "DEG")]
    longitude: Option<f64>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
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
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::CheckConfig(command) => command_check_config(&command),
        Commands::Trigger(command) => command_trigger(command).await,
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let mut config = load_config(&command.config)?;
    if let Some(bind) = command.bind {
        config.server.bind = bind;
    }
    let addr = config.bind_addr().map_err(|err| CliError::new(err.to_string()))?;
    let server =
        AegisServer::from_config(config).map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&format!("aegis listening on {addr}"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    server.serve().await.map_err(|err| CliError::new(err.to_string()))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Check-Config Command
// ============================================================================

/// Executes the `check-config` command.
fn command_check_config(command: &CheckConfigCommand) -> CliResult<ExitCode> {
    load_config(&command.config)?;
    write_stdout_line("configuration OK")
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads and validates a configuration file.
fn load_config(path: &std::path::Path) -> CliResult<AegisConfig> {
    AegisConfig::load_from_path(path)
        .map_err(|err| CliError::new(format!("config {}: {err}", path.display())))
}

// ============================================================================
// SECTION: Trigger Command
// ============================================================================

/// Executes the `trigger` command.
async fn command_trigger(command: TriggerCommand) -> CliResult<ExitCode> {
    let api = Arc::new(HttpTriggerApi::new(command.url));
    let response = api
        .trigger(command.latitude, command.longitude)
        .await
        .map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&response.message)
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&format!(
        "alert {} -> {} ({})",
        response.alert.id, response.primary_contact.name, response.primary_contact.phone
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes one line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes one line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
