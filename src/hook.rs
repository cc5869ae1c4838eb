//! Hook entry point: one event in, one decision out.
//!
//! Everything that can fail (reading input, decoding the event, compiling
//! rules, reading parameters) happens inside [`classify`], and every failure
//! there becomes [`Decision::Prompt`]. Only the final write can return an
//! error, and by then there is nothing left to report on stdout.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::models::decision::{Decision, DecisionRecord};
use crate::models::event::ToolEvent;
use crate::policy::evaluator::{Evaluation, PolicyEvaluator};
use crate::policy::rules::Rulebook;
use crate::{AppError, Result};

/// Read one event from `input`, classify it, and write the decision line.
///
/// # Errors
///
/// Returns `AppError::Io` only if the decision cannot be written.
pub fn run<R: Read, W: Write>(input: R, output: W) -> Result<Decision> {
    let decision = decide_from(input);
    write_decision(output, decision)?;
    Ok(decision)
}

/// Like [`run`], reading the event from a file on disk.
///
/// An unreadable file is treated like malformed input.
///
/// # Errors
///
/// Returns `AppError::Io` only if the decision cannot be written.
pub fn run_file<W: Write>(path: &Path, output: W) -> Result<Decision> {
    match File::open(path) {
        Ok(file) => run(file, output),
        Err(err) => {
            warn!(path = %path.display(), %err, "cannot open event file, prompting");
            write_decision(output, Decision::Prompt)?;
            Ok(Decision::Prompt)
        }
    }
}

/// Classify a raw event record. Never fails.
#[must_use]
pub fn decide(raw: &str) -> Decision {
    decide_from(raw.as_bytes())
}

/// Write `decision` as a single JSON line and flush.
///
/// # Errors
///
/// Returns `AppError::Io` if serialization or the write fails.
pub fn write_decision<W: Write>(mut output: W, decision: Decision) -> Result<()> {
    serde_json::to_writer(&mut output, &DecisionRecord::from(decision))
        .map_err(|err| AppError::Io(format!("failed to write decision: {err}")))?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}

fn decide_from<R: Read>(input: R) -> Decision {
    match classify(input) {
        Ok(evaluation) => {
            info!(
                decision = %evaluation.decision,
                matched_rule = evaluation.matched_rule.as_deref().unwrap_or("-"),
                "event classified"
            );
            evaluation.decision
        }
        Err(err) => {
            warn!(%err, "could not classify event, prompting");
            Decision::Prompt
        }
    }
}

fn classify<R: Read>(mut input: R) -> Result<Evaluation> {
    let mut raw = String::new();
    input.read_to_string(&mut raw)?;

    let rules = Rulebook::builtin()?;
    let event = ToolEvent::from_json(&raw)?;
    PolicyEvaluator::check(&event, &rules)
}
