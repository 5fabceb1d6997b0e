//! Typed access to tool call arguments.

use crate::error::AgentError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    /// Wrap raw arguments. Some models send the argument object as a JSON
    /// string; that string is parsed here, and a blank one means "no arguments".
    pub fn new(value: serde_json::Value) -> Self {
        let value = match value {
            serde_json::Value::String(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    serde_json::json!({})
                } else {
                    serde_json::from_str(trimmed).unwrap_or(serde_json::Value::String(raw))
                }
            }
            serde_json::Value::Null => serde_json::json!({}),
            other => other,
        };
        Self { value }
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    fn require(&self, key: &str, kind: &str) -> Result<&serde_json::Value, AgentError> {
        match self.value.get(key) {
            Some(serde_json::Value::Null) | None => Err(AgentError::InvalidArgument(format!(
                "Missing {kind} argument: {key}"
            ))),
            Some(v) => Ok(v),
        }
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, AgentError> {
        let value = self.require(key, "string")?;
        value.as_str().ok_or_else(|| wrong_type(key, "a string", value))
    }

    /// Get an integer argument.
    ///
    /// Models often quote numbers, so `"2"` and whole floats like `2.0` are
    /// accepted too.
    pub fn get_i64(&self, key: &str) -> Result<i64, AgentError> {
        let value = self.require(key, "integer")?;
        let parsed = match value {
            serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
            serde_json::Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole))
            }
            _ => None,
        };
        parsed.ok_or_else(|| wrong_type(key, "an integer", value))
    }

    /// Get a boolean argument.
    ///
    /// Accepts `true`/`false` as strings (also `yes`/`no`, `on`/`off`,
    /// `1`/`0`) and the numbers 0 and 1.
    pub fn get_bool(&self, key: &str) -> Result<bool, AgentError> {
        let value = self.require(key, "boolean")?;
        let parsed = match value {
            serde_json::Value::Bool(b) => Some(*b),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(x) if x == 0.0 => Some(false),
                Some(x) if x == 1.0 => Some(true),
                _ => None,
            },
            serde_json::Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
                "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        };
        parsed.ok_or_else(|| wrong_type(key, "a boolean", value))
    }

    /// Deserialize the entire arguments into a typed struct.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, AgentError> {
        serde_json::from_value(self.value.clone())
            .map_err(|e| AgentError::InvalidArgument(format!("Invalid arguments: {e}")))
    }
}

fn whole(x: f64) -> Option<i64> {
    (x.fract() == 0.0 && x >= i64::MIN as f64 && x <= i64::MAX as f64).then_some(x as i64)
}

fn wrong_type(key: &str, expected: &str, got: &serde_json::Value) -> AgentError {
    AgentError::InvalidArgument(format!("Argument {key} must be {expected}, got {got}"))
}
