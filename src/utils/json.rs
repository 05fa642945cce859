use serde_json::Value;

/// Parses `raw` as JSON, handing the original text back as a string value
/// when it is not valid JSON.
pub fn try_parse_json(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
