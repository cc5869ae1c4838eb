#![forbid(unsafe_code)]

//! `auto-approve` — classifies one agent tool invocation as safe to run
//! unattended (`approve`) or needing a human (`prompt`).

pub mod errors;
pub mod hook;
pub mod models;
pub mod policy;

pub use errors::{AppError, Result};
pub use models::decision::Decision;
pub use models::event::ToolEvent;
