//! Hook payload handling.
//!
//! Claude Code sends a JSON object on stdin (`prompt`, `cwd`, `sessionId`,
//! ...). Only `prompt` is used. Input that is not JSON is taken verbatim as
//! the prompt.

use serde_json::Value;

/// Pull the prompt out of the raw hook payload
pub fn extract_prompt(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(payload) => payload
            .get("prompt")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Whitespace-only prompts are never evaluated
pub fn is_blank(prompt: &str) -> bool {
    prompt.trim().is_empty()
}
