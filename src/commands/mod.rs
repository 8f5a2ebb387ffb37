//! Command dispatch and handlers.

pub mod log;
pub mod search;
pub mod stats;
pub mod tasks;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{Error, Failure};

/// Dispatch a parsed command line to its handler.
///
/// Loads configuration, installs the stderr log subscriber, and builds a live
/// service context rooted at the configured project.
///
/// # Errors
///
/// Returns the rendered failure (message plus next steps) if configuration
/// loading or the selected command fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = Config::load(cli.project.as_deref()).map_err(|e| render_failure(&e))?;
    init_logging(&config.log_filter);
    let ctx = Arc::new(ServiceContext::live(&config));
    dispatch_with_context(&cli.command, &ctx)
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(command: &Command, ctx: &Arc<ServiceContext>) -> Result<(), String> {
    match command {
        Command::Log(args) => log::run(ctx, args),
        Command::Search { term, spec, artifact_type } => {
            search::run(ctx, term, spec.as_deref(), *artifact_type)
        }
        Command::Tasks { spec, archived } => tasks::run(ctx, spec, *archived),
        Command::Stats { spec, task } => stats::run(ctx, spec, task),
    }
}

/// Formats a library error for the terminal.
pub(crate) fn render_failure(err: &Error) -> String {
    Failure::from(err).to_string()
}

/// Pretty-prints a serializable response to stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize response: {e}"))?;
    println!("{json}");
    Ok(())
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("specledger=warn"));
    // A subscriber may already be installed when dispatch runs more than once
    // in one process (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
