//! Triseq - Main entrypoint.
//!
//! Loads configuration, initializes logging and runs command scripts against
//! a sequence dictionary.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use triseq_lib::config::{self, ConfigLoader, LogConfig, OutputFormat, TriseqConfig};
use triseq_lib::data_structures::SeqTrieConfig;
use triseq_lib::error::{
    get_error_reporting, set_error_reporter, ErrorContext, TracingErrorReporter, TriseqError,
    TriseqResult,
};
use triseq_lib::script::ScriptRunner;

/// Command line arguments for triseq.
#[derive(Parser, Debug)]
#[clap(name = "triseq", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Override the configured output format
    #[clap(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run a command script (reads stdin when no file is given)
    Run {
        /// Path to the script file
        #[clap(value_parser)]
        script: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr so
/// that command results on stdout stay machine-readable.
fn init_logging(log: &LogConfig) -> TriseqResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| TriseqError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Reports a fatal error and exits with a failure status.
fn fail(error: impl Into<TriseqError>, component: &str) -> ! {
    get_error_reporting().report(ErrorContext::new(error, component));
    process::exit(1);
}

/// Runs a script from `path`, or stdin when absent.
fn run_script(config: &TriseqConfig, path: Option<PathBuf>) -> TriseqResult<()> {
    let input: Box<dyn BufRead> = match &path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let output = BufWriter::new(io::stdout().lock());

    let mut runner = ScriptRunner::new(
        SeqTrieConfig::from(&config.dictionary),
        config.script.clone(),
    );
    let summary = runner.run(input, output)?;

    info!(
        commands = summary.commands,
        invalid_arguments = summary.invalid_arguments,
        failures = summary.failures,
        parse_errors = summary.parse_errors,
        nodes = runner.dictionary().node_count(),
        classes = runner.dictionary().class_count(),
        "Script completed"
    );
    Ok(())
}

/// Main entry point for the application.
fn main() -> TriseqResult<()> {
    let args = <Args as clap::Parser>::parse();

    let config_loader = ConfigLoader::new(args.config.as_deref(), config::ENV_PREFIX);
    let loaded = config_loader.load();

    // Logging comes up even when the configuration is broken so the error is visible
    let log_config = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    init_logging(&log_config)?;
    set_error_reporter(Arc::new(TracingErrorReporter));

    match args.command.unwrap_or(Command::Run { script: None }) {
        Command::Run { script } => {
            let mut config = loaded.unwrap_or_else(|e| fail(e, "config"));
            if let Some(format) = args.output {
                config.script.output = format;
            }

            info!(script = ?script, output = ?config.script.output, "Running script");
            if let Err(e) = run_script(&config, script) {
                fail(e, "script");
            }
            Ok(())
        }
        Command::Validate => {
            info!("Validating configuration");
            match loaded {
                Ok(_) => {
                    info!("Configuration validated successfully");
                    Ok(())
                }
                Err(e) => fail(e, "config"),
            }
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let toml = TriseqConfig::default().to_toml()?;

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
