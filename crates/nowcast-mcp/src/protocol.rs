//! JSON-RPC 2.0 protocol types for MCP over HTTP.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON-RPC version string.
pub const JSONRPC_VERSION: &str = "2.0";

/// Method used to invoke a remote tool.
pub const METHOD_TOOLS_CALL: &str = "tools/call";

/// Method used to enumerate remote tools.
pub const METHOD_TOOLS_LIST: &str = "tools/list";

// ─────────────────────────────────────────────────────────────────────────────
// JSON-RPC Base Types
// ─────────────────────────────────────────────────────────────────────────────

/// A JSON-RPC request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0").
    pub jsonrpc: String,
    /// Request ID for correlating responses.
    pub id: u64,
    /// Method name to call.
    pub method: String,
    /// Method parameters, always an object on the wire.
    pub params: Map<String, Value>,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request.
    pub fn new(id: u64, method: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC error object as returned by the server.
///
/// Servers in the wild are lax here, so both fields are optional on decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Optional additional data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

// Standard JSON-RPC error codes
impl JsonRpcError {
    /// Parse error - Invalid JSON.
    pub const PARSE_ERROR: i64 = -32700;
    /// Invalid Request - Not a valid Request object.
    pub const INVALID_REQUEST: i64 = -32600;
    /// Method not found.
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Invalid params.
    pub const INVALID_PARAMS: i64 = -32602;
    /// Internal error.
    pub const INTERNAL_ERROR: i64 = -32603;

    /// Interpret an arbitrary `error` member.
    ///
    /// Objects contribute `code`, `message` and `data`; a bare string becomes
    /// the message; anything else is kept as its compact JSON text.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(obj) => Self {
                code: obj.get("code").and_then(Value::as_i64),
                message: match obj.get("message") {
                    Some(Value::String(message)) => message.clone(),
                    _ => value.to_string(),
                },
                data: obj.get("data").cloned(),
            },
            Value::String(message) => Self {
                message: message.clone(),
                ..Default::default()
            },
            other => Self {
                message: other.to_string(),
                ..Default::default()
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MCP Tool Types
// ─────────────────────────────────────────────────────────────────────────────

/// A tool definition from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    /// Tool name (unique identifier).
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool's input parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

/// Result of the tools/list request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResult {
    /// List of available tools.
    pub tools: Vec<ToolInfo>,
}

/// Parameters for the tools/call request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
    /// Name of the tool to call.
    pub name: String,
    /// Arguments to pass to the tool.
    pub arguments: Map<String, Value>,
}

impl CallToolParams {
    /// Convert into the `params` object of a `tools/call` request.
    pub fn into_params(self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("name".to_string(), Value::String(self.name));
        params.insert("arguments".to_string(), Value::Object(self.arguments));
        params
    }
}
