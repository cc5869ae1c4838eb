//! Auto-approve policy modules.
//!
//! Provides the built-in rule tables and the evaluator that applies them
//! to a single tool invocation.

pub mod evaluator;
pub mod rules;
