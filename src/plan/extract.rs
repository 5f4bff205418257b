// ABOUTME: Best-effort recovery of a JSON value embedded in model output text
// ABOUTME: Direct parse, balanced brace scans, then a first-to-last brace slice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::Value;

/// Recover a JSON value from `text`
///
/// Strategies, in order:
///
/// 1. parse the whole text
/// 2. from the first `{`, track brace depth and parse the substring where it
///    first returns to zero
/// 3. the same with `[` and `]`
/// 4. parse from the first `{` to the last `}`
///
/// Depth tracking counts braces inside string literals too, so an object
/// whose strings contain unbalanced braces can be cut short; strategy 4
/// usually recovers those.
///
/// ```rust
/// use fitplan_server::plan::extract_json;
/// use serde_json::json;
///
/// let text = "Here you go: {\"a\": {\"b\": 1}} hope this helps";
/// assert_eq!(extract_json(text), Some(json!({"a": {"b": 1}})));
/// assert_eq!(extract_json("no json here"), None);
/// ```
#[must_use]
pub fn extract_json(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    balanced(text, b'{', b'}')
        .or_else(|| balanced(text, b'[', b']'))
        .or_else(|| outer_object(text))
}

/// Parse the first balanced `open`/`close` region
///
/// Gives up (returns `None`) as soon as the first balanced region fails to
/// parse; later regions are not tried.
fn balanced(text: &str, open: u8, close: u8) -> Option<Value> {
    let start = text.bytes().position(|b| b == open)?;
    let mut depth = 0_i64;

    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        if *byte == open {
            depth += 1;
        } else if *byte == close {
            depth -= 1;
        }
        if depth == 0 {
            // ASCII delimiters always sit on char boundaries
            let region = text.get(start..=start + offset)?;
            return serde_json::from_str(region).ok();
        }
    }
    None
}

fn outer_object(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(text.get(start..=end)?).ok()
}

/// Whether a recovered value counts as present
///
/// `null`, `false`, `0` and the empty string are treated like a failed
/// extraction by the pipeline.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
