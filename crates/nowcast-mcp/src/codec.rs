//! JSON-RPC envelope codec.
//!
//! Builds request envelopes with monotonically increasing ids and decodes
//! response bodies into a result object, tolerating the loose envelopes that
//! some tool servers produce.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};

use crate::error::{McpError, Result};
use crate::protocol::{JsonRpcError, JsonRpcRequest};

/// Key used when a non-object result has to be wrapped into an object.
pub const WRAPPED_VALUE_KEY: &str = "value";

/// Monotonic request id source, starting at 1.
///
/// Safe to share between concurrent callers: each call to [`RequestIds::next`]
/// hands out a distinct id.
#[derive(Debug)]
pub struct RequestIds {
    next: AtomicU64,
}

impl RequestIds {
    /// Create a counter whose first id is 1.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Take the next id.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// Build a request envelope stamped with the next id.
    pub fn build_request(
        &self,
        method: impl Into<String>,
        params: Map<String, Value>,
    ) -> JsonRpcRequest {
        JsonRpcRequest::new(self.next(), method, params)
    }
}

impl Default for RequestIds {
    fn default() -> Self {
        Self::new()
    }
}

/// How the result object was recovered from the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// `result` member holding an object.
    Result,
    /// `result` member holding a non-object, wrapped under `value`.
    WrappedResult,
    /// Object with neither `result` nor `error`; the whole object is the result.
    BareObject,
    /// Top-level JSON that is not an object, wrapped under `value`.
    WrappedScalar,
}

/// A decoded, successful JSON-RPC response.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcReply {
    /// Echoed request id. Advisory only, never checked against the request.
    pub id: Option<Value>,
    /// The result object.
    pub result: Map<String, Value>,
    /// Which envelope shape produced `result`.
    pub shape: ReplyShape,
}

impl RpcReply {
    /// Whether the envelope lacked both `result` and `error`.
    pub fn is_ambiguous(&self) -> bool {
        self.shape == ReplyShape::BareObject
    }
}

/// Decode a raw response body.
///
/// A truthy `error` member becomes [`McpError::Protocol`]; a body that is not
/// JSON becomes [`McpError::MalformedResponse`].
pub fn decode_response(body: &[u8]) -> Result<RpcReply> {
    let data: Value = serde_json::from_slice(body)
        .map_err(|e| McpError::malformed(format!("response body is not JSON: {}", e)))?;

    let mut obj = match data {
        Value::Object(obj) => obj,
        other => {
            return Ok(RpcReply {
                id: None,
                result: wrap_value(other),
                shape: ReplyShape::WrappedScalar,
            });
        }
    };

    if let Some(error) = obj.get("error").filter(|e| is_truthy(e)) {
        let error = JsonRpcError::from_value(error);
        return Err(McpError::Protocol {
            code: error.code,
            message: error.message,
            data: error.data,
        });
    }

    let id = obj.get("id").cloned();
    let reply = match obj.remove("result") {
        Some(Value::Object(result)) => RpcReply {
            id,
            result,
            shape: ReplyShape::Result,
        },
        Some(other) => RpcReply {
            id,
            result: wrap_value(other),
            shape: ReplyShape::WrappedResult,
        },
        None => RpcReply {
            id,
            result: obj,
            shape: ReplyShape::BareObject,
        },
    };
    Ok(reply)
}

fn wrap_value(value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(WRAPPED_VALUE_KEY.to_string(), value);
    map
}

/// Loose truthiness: null, false, zero, and empty strings/arrays/objects are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Result<RpcReply> {
        decode_response(value.to_string().as_bytes())
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let ids = RequestIds::new();
        let first = ids.build_request("tools/list", Map::new());
        let second = ids.build_request("tools/call", Map::new());
        let third = ids.build_request("tools/call", Map::new());
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
    }

    #[test]
    fn test_ids_are_unique_across_threads() {
        let ids = std::sync::Arc::new(RequestIds::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..100).map(|_| ids.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
        assert_eq!(all.first(), Some(&1));
        assert_eq!(all.last(), Some(&800));
    }

    #[test]
    fn test_object_result_passes_through() {
        let reply = decode(json!({"jsonrpc": "2.0", "id": 4, "result": {"a": 1}})).unwrap();
        assert_eq!(reply.shape, ReplyShape::Result);
        assert_eq!(reply.id, Some(json!(4)));
        assert_eq!(Value::Object(reply.result), json!({"a": 1}));
    }

    #[test]
    fn test_scalar_result_is_wrapped() {
        let reply = decode(json!({"id": 1, "result": 42})).unwrap();
        assert_eq!(reply.shape, ReplyShape::WrappedResult);
        assert_eq!(Value::Object(reply.result), json!({"value": 42}));

        let reply = decode(json!({"id": 1, "result": null})).unwrap();
        assert_eq!(Value::Object(reply.result), json!({"value": null}));
    }

    #[test]
    fn test_error_member_is_protocol_error() {
        let err = decode(json!({"id": 1, "error": {"message": "bad city"}})).unwrap_err();
        match err {
            McpError::Protocol { message, code, .. } => {
                assert_eq!(message, "bad city");
                assert!(code.is_none());
            }
            other => panic!("expected protocol error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_wins_over_result() {
        let err = decode(json!({"result": {"ok": true}, "error": "nope"})).unwrap_err();
        assert!(matches!(err, McpError::Protocol { ref message, .. } if message == "nope"));
    }

    #[test]
    fn test_falsy_error_member_is_ignored() {
        let reply = decode(json!({"id": 1, "error": null, "result": {"ok": true}})).unwrap();
        assert_eq!(Value::Object(reply.result), json!({"ok": true}));

        let reply = decode(json!({"error": {}, "result": {"ok": true}})).unwrap();
        assert_eq!(reply.shape, ReplyShape::Result);
    }

    #[test]
    fn test_bare_object_is_the_result() {
        let reply = decode(json!({"supported_cities": ["서울"]})).unwrap();
        assert!(reply.is_ambiguous());
        assert_eq!(
            Value::Object(reply.result),
            json!({"supported_cities": ["서울"]})
        );
    }

    #[test]
    fn test_non_object_body_is_wrapped() {
        let reply = decode(json!(["a", "b"])).unwrap();
        assert_eq!(reply.shape, ReplyShape::WrappedScalar);
        assert!(reply.id.is_none());
        assert_eq!(Value::Object(reply.result), json!({"value": ["a", "b"]}));

        let reply = decode_response(b"\"hello\"").unwrap();
        assert_eq!(Value::Object(reply.result), json!({"value": "hello"}));
    }

    #[test]
    fn test_malformed_body() {
        let err = decode_response(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, McpError::MalformedResponse(_)));
        assert!(err.to_string().contains("not JSON"));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!({"message": ""})));
    }
}
