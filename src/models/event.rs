//! Incoming tool-invocation event.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{AppError, Result};

/// Loosely-typed parameter payload attached to a tool call.
///
/// Shape depends on the tool and is only checked when a rule reads a field
/// through [`Parameters::text`]. Tools approved by name never look inside,
/// so an odd payload on them is harmless.
///
/// An absent payload defaults to an empty object; an explicit `null` stays
/// `null` and is rejected on read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Value);

impl Default for Parameters {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl Parameters {
    /// Wrap an already-decoded JSON object.
    #[must_use]
    pub fn new(map: Map<String, Value>) -> Self {
        Self(Value::Object(map))
    }

    /// Read a string parameter.
    ///
    /// An absent key reads as `""`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Input` when the payload is not an object or the key
    /// holds anything but a string, `null` included.
    pub fn text(&self, key: &str) -> Result<&str> {
        let map = match &self.0 {
            Value::Object(map) => map,
            other => {
                return Err(AppError::Input(format!(
                    "parameters must be an object, got {}",
                    json_kind(other)
                )))
            }
        };

        match map.get(key) {
            None => Ok(""),
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(AppError::Input(format!(
                "parameter `{key}` must be a string, got {}",
                json_kind(other)
            ))),
        }
    }
}

impl From<Value> for Parameters {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A single proposed tool invocation, as delivered by the hook runner.
///
/// Extra top-level keys (`session_id`, `hook_event_name`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolEvent {
    /// Identifier of the tool being invoked (`Read`, `Bash`, ...).
    pub tool_name: String,
    /// Tool arguments. Accepted under `parameters` or `tool_input`.
    #[serde(default, alias = "tool_input")]
    pub parameters: Parameters,
}

impl ToolEvent {
    /// Build an event directly.
    #[must_use]
    pub fn new(tool_name: impl Into<String>, parameters: impl Into<Parameters>) -> Self {
        Self {
            tool_name: tool_name.into(),
            parameters: parameters.into(),
        }
    }

    /// Decode an event from its JSON text form.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Input` if the text is not a JSON object or lacks a
    /// string `tool_name`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(AppError::Input(format!(
                "event record must be an object, got {}",
                json_kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
