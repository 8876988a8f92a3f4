//! Tool result normalization.
//!
//! A `tools/call` result can carry its payload three ways:
//!
//! ```text
//! {"structuredContent": {...}}                          -> the structured value
//! {"content": [{"type": "text", "text": "..."}], ...}   -> the text, parsed if JSON
//! anything else                                         -> the result unchanged
//! ```
//!
//! The first matching form wins. Text that looks like JSON but fails to parse
//! is kept under `raw_text` rather than dropped.

use serde::Serialize;
use serde_json::{Map, Value};

/// Key holding plain (non-JSON) text content.
pub const TEXT_KEY: &str = "text";

/// Key holding text content that looked like JSON but did not parse.
pub const RAW_TEXT_KEY: &str = "raw_text";

/// The payload of a tool result, classified by encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPayload {
    /// Non-null `structuredContent`.
    Structured(Value),
    /// Text of the first `content` item.
    Text(String),
    /// No recognised encoding.
    Passthrough(Map<String, Value>),
}

impl ToolPayload {
    /// Classify a raw `tools/call` result.
    pub fn classify(mut result: Map<String, Value>) -> Self {
        if result.get("structuredContent").is_some_and(|v| !v.is_null())
            && let Some(structured) = result.remove("structuredContent")
        {
            return Self::Structured(structured);
        }

        if let Some(text) = first_text_content(&result) {
            return Self::Text(text.to_string());
        }

        Self::Passthrough(result)
    }

    /// Collapse the payload into its canonical value.
    pub fn into_value(self) -> ToolValue {
        match self {
            Self::Structured(value) => ToolValue(value),
            Self::Text(text) => ToolValue(text_to_value(text)),
            Self::Passthrough(result) => ToolValue(Value::Object(result)),
        }
    }
}

/// Normalize a raw `tools/call` result into its canonical value.
pub fn normalize(result: Map<String, Value>) -> ToolValue {
    ToolPayload::classify(result).into_value()
}

fn first_text_content(result: &Map<String, Value>) -> Option<&str> {
    let Some(Value::Array(content)) = result.get("content") else {
        return None;
    };
    let Some(Value::Object(first)) = content.first() else {
        return None;
    };
    match (first.get("type"), first.get("text")) {
        (Some(Value::String(kind)), Some(Value::String(text))) if kind == "text" => Some(text),
        _ => None,
    }
}

fn text_to_value(text: String) -> Value {
    let trimmed = text.trim();
    // An opening bracket is enough: truncated JSON must land in `raw_text`.
    let looks_like_json = trimmed.starts_with('{') || trimmed.starts_with('[');

    let key = if looks_like_json {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(parsed) => return parsed,
            Err(e) => {
                tracing::debug!(error = %e, "tool text looked like JSON but did not parse");
                RAW_TEXT_KEY
            }
        }
    } else {
        TEXT_KEY
    };

    let mut map = Map::new();
    map.insert(key.to_string(), Value::String(text));
    Value::Object(map)
}

/// Canonical value produced by a tool call: no envelope left, just the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ToolValue(Value);

impl ToolValue {
    /// Wrap an already-canonical value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Look up a top-level field when the value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|obj| obj.get(key))
    }

    /// Whether the tool reported failure with `ok: false`.
    pub fn is_failure(&self) -> bool {
        matches!(self.get("ok"), Some(Value::Bool(false)))
    }

    /// The tool's `error` message, if it sent one as a string.
    pub fn error_message(&self) -> Option<&str> {
        self.get("error").and_then(Value::as_str)
    }

    /// A top-level array field rendered as strings.
    ///
    /// Non-string items are rendered as compact JSON.
    pub fn string_list(&self, key: &str) -> Option<Vec<String>> {
        let items = self.get(key)?.as_array()?;
        Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        )
    }

    /// Pretty-printed JSON with two-space indent and non-ASCII kept as is.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl From<Value> for ToolValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<ToolValue> for Value {
    fn from(value: ToolValue) -> Self {
        value.0
    }
}
