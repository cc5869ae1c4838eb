//! Outgoing hook decision.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Outcome of evaluating a tool invocation.
///
/// There is no deny state: anything not approved is handed to a human.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Run the tool call without asking.
    Approve,
    /// Ask the operator before running the tool call.
    Prompt,
}

impl Decision {
    /// Wire name (`"approve"` / `"prompt"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Prompt => "prompt",
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single record written to stdout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionRecord {
    /// The decision for the pending tool call.
    pub decision: Decision,
}

impl From<Decision> for DecisionRecord {
    fn from(decision: Decision) -> Self {
        Self { decision }
    }
}
