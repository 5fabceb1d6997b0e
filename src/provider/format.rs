//! Provider formatting helpers.

use serde_json::Value;

/// Convert a tool result JSON value into a string payload for providers.
pub(crate) fn tool_result_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_are_not_requoted() {
        assert_eq!(tool_result_to_string(&json!("LED 1 is ON")), "LED 1 is ON");
    }

    #[test]
    fn objects_are_rendered_as_json() {
        assert_eq!(
            tool_result_to_string(&json!({"error": "Tool 'x' not found"})),
            r#"{"error":"Tool 'x' not found"}"#
        );
    }
}
