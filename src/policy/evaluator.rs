//! Policy evaluator for tool-invocation events.
//!
//! Decides whether a single tool call may run unattended. Risk checks
//! (sensitive paths, dangerous commands) always run before allow-lists and
//! short-circuit, so nothing that trips a risk rule can be approved.

use tracing::{info, info_span, warn};

use crate::models::decision::Decision;
use crate::models::event::ToolEvent;
use crate::policy::rules::{Rulebook, ToolKind};
use crate::Result;

/// Result of evaluating one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The decision to report.
    pub decision: Decision,
    /// The rule that decided, or `None` when a default branch did.
    pub matched_rule: Option<String>,
}

/// Evaluates the built-in rules against a tool invocation.
pub struct PolicyEvaluator;

impl PolicyEvaluator {
    /// Classify `event` under `rules`.
    ///
    /// Evaluation order:
    /// 1. Read-only tools are approved outright.
    /// 2. Edits prompt on a sensitive path, otherwise approve.
    /// 3. Writes prompt on a sensitive path, approve on a safe-write path,
    ///    otherwise prompt.
    /// 4. Shell commands prompt on a dangerous fragment, approve on a safe
    ///    command, otherwise prompt.
    /// 5. Unknown tools prompt.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Input` if a parameter the tool needs is present
    /// but not a string.
    pub fn check(event: &ToolEvent, rules: &Rulebook) -> Result<Evaluation> {
        let _span = info_span!(
            "policy_evaluate",
            tool_name = %event.tool_name,
        )
        .entered();

        match ToolKind::classify(&event.tool_name) {
            // ── 1. Read-only tools ───────────────────────────────
            ToolKind::ReadOnly => Ok(approve(Some(format!("tool:{}", event.tool_name)))),

            // ── 2. In-place edits ────────────────────────────────
            ToolKind::Edit => {
                let file_path = event.parameters.text("file_path")?;
                if let Some(rule) = rules.sensitive_paths.matched_rule(file_path) {
                    info!(matched_rule = %rule, file_path, "sensitive edit target");
                    return Ok(prompt(Some(rule)));
                }
                Ok(approve(None))
            }

            // ── 3. New-file writes ───────────────────────────────
            ToolKind::Write => {
                let file_path = event.parameters.text("file_path")?;
                if let Some(rule) = rules.sensitive_paths.matched_rule(file_path) {
                    info!(matched_rule = %rule, file_path, "sensitive write target");
                    return Ok(prompt(Some(rule)));
                }
                match rules.safe_writes.matched_rule(file_path) {
                    Some(rule) => Ok(approve(Some(rule))),
                    None => Ok(prompt(None)),
                }
            }

            // ── 4. Shell commands ────────────────────────────────
            ToolKind::Shell => {
                let command = event.parameters.text("command")?;
                if let Some(rule) = rules.dangerous_commands.matched_rule(command) {
                    info!(matched_rule = %rule, "dangerous command");
                    return Ok(prompt(Some(rule)));
                }
                match rules.safe_commands.matched_rule(command) {
                    Some(rule) => Ok(approve(Some(rule))),
                    None => Ok(prompt(None)),
                }
            }

            // ── 5. Unknown tools ─────────────────────────────────
            ToolKind::Unknown => Ok(prompt(None)),
        }
    }

    /// Classify `event`, collapsing any failure to [`Decision::Prompt`].
    #[must_use]
    pub fn evaluate(event: &ToolEvent, rules: &Rulebook) -> Decision {
        match Self::check(event, rules) {
            Ok(evaluation) => evaluation.decision,
            Err(err) => {
                warn!(tool_name = %event.tool_name, %err, "evaluation failed, prompting");
                Decision::Prompt
            }
        }
    }
}

fn approve(matched_rule: Option<String>) -> Evaluation {
    Evaluation {
        decision: Decision::Approve,
        matched_rule,
    }
}

fn prompt(matched_rule: Option<String>) -> Evaluation {
    Evaluation {
        decision: Decision::Prompt,
        matched_rule,
    }
}
