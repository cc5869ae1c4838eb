#![forbid(unsafe_code)]

//! `auto-approve` — PreToolUse hook binary.
//!
//! Reads one tool-invocation event as JSON on stdin and prints
//! `{"decision":"approve"}` or `{"decision":"prompt"}` on stdout. Diagnostics
//! go to stderr. The process exits 0 whatever happens so the hook runner
//! always gets a decision.

use std::io;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use tracing::{error, warn};
use tracing_subscriber::{fmt, EnvFilter};

use auto_approve::{hook, AppError, Result};

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Parser)]
#[command(name = "auto-approve", about = "Auto-approve hook for agent tool calls", version, long_about = None)]
struct Cli {
    /// Log output format on stderr (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Read the event from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() {
    let (args, arg_error) = match Cli::try_parse() {
        Ok(args) => (args, None),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            // Nothing sensible to do if printing help fails.
            let _ = err.print();
            return;
        }
        Err(err) => (Cli::default(), Some(err)),
    };

    if let Err(err) = init_tracing(args.log_format) {
        eprintln!("auto-approve: {err}");
    }
    if let Some(err) = arg_error {
        warn!(%err, "ignoring invalid command-line arguments");
    }

    let stdout = io::stdout().lock();
    let outcome = match args.input {
        Some(ref path) => hook::run_file(path, stdout),
        None => hook::run(io::stdin().lock(), stdout),
    };

    if let Err(err) = outcome {
        error!(%err, "failed to emit decision");
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt().with_env_filter(env_filter).with_writer(io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Io(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Io(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
