//! Error types shared across the hook.
//!
//! Every variant ends up as a `prompt` decision at the top of
//! [`crate::hook::run`]; the variants only exist so the diagnostic log says
//! which stage gave up.

use std::fmt::{Display, Formatter};

/// Shared hook result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure modes encountered while classifying an event.
#[derive(Debug)]
pub enum AppError {
    /// The event record was unparseable or had an unexpected shape.
    Input(String),
    /// A rule pattern failed to compile.
    Policy(String),
    /// Reading the event or writing the decision failed.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(msg) => write!(f, "input: {msg}"),
            Self::Policy(msg) => write!(f, "policy: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Input(format!("invalid event record: {err}"))
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        Self::Policy(format!("invalid rule pattern: {err}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
