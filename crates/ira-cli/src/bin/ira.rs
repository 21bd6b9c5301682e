//! `ira` command-line driver.
//!
//! ```bash
//! ira translate model.json --schemas ops.toml --compat compat.toml --stats
//! ira schemas --schemas ops.toml --slots
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use ira_cli::{
    cli::CliConfig,
    commands::{self, schemas::SchemasArgs, translate::TranslateArgs},
    diagnostics::setup_error_reporting,
    Result,
};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(
    name = "ira",
    version = env!("CARGO_PKG_VERSION"),
    about = "ira: translate legacy operation lists into a typed SSA IR"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, global = true, value_enum)]
    log: Option<LogLevel>,

    /// Set log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a legacy program into the target IR
    Translate(TranslateArgs),

    /// List registered op kinds
    Schemas(SchemasArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_error_reporting()?;
    setup_logging(cli.verbose, cli.quiet, cli.log, cli.log_format)?;

    let config = CliConfig::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Translate(args) => commands::translate_command(args, &config),
        Commands::Schemas(args) => commands::schemas_command(args, &config),
    };

    if let Err(e) = result {
        if !ira_cli::diagnostics::render_cli_error(&e) {
            error!("{}", e);
        }
        std::process::exit(1);
    }
    Ok(())
}

fn setup_logging(
    verbose: u8,
    quiet: bool,
    log_level: Option<LogLevel>,
    log_format: LogFormat,
) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = match (log_level, quiet, verbose) {
        (Some(LogLevel::Error), _, _) | (None, true, _) => "error",
        (Some(LogLevel::Warn), _, _) | (None, false, 0) => "warn",
        (Some(LogLevel::Info), _, _) | (None, false, 1) => "info",
        (Some(LogLevel::Debug), _, _) | (None, false, 2) => "debug",
        (Some(LogLevel::Trace), _, _) | (None, false, _) => "trace",
    };
    let filter = EnvFilter::new(level);

    // stdout carries the translated program
    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    match log_format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(formatter)
                .with(filter)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(formatter.json())
                .with(filter)
                .init();
        }
    }

    Ok(())
}
