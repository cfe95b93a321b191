//! Response body handling

use serde_json::Value;

/// Parse a response body without ever failing
///
/// An empty body is `null`; text that is not JSON is kept as a string so
/// error logs still show what the server said.
pub fn safe_parse(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Best human-readable message in an error body
///
/// Looks for `error.message`, then `message`, and falls back to `fallback`.
pub fn error_message(body: &Value, fallback: &str) -> String {
    body.pointer("/error/message")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}
