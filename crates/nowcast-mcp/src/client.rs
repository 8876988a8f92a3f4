//! MCP client for invoking weather tools on a remote server.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::codec::{self, RequestIds, RpcReply};
use crate::error::{McpError, Result};
use crate::normalize::{self, ToolValue};
use crate::protocol::{
    CallToolParams, ListToolsResult, METHOD_TOOLS_CALL, METHOD_TOOLS_LIST, ToolInfo,
};
use crate::transport::{HttpTransport, HttpTransportConfig, Transport};

/// Remote tool listing the cities the server can answer for.
pub const TOOL_LIST_SUPPORTED_CITIES: &str = "list_supported_cities";

/// Remote tool returning the current observation for a city.
pub const TOOL_GET_NOW_WEATHER: &str = "get_now_weather";

/// Configuration for an MCP server connection.
#[derive(Debug, Clone)]
pub struct McpServerConfig {
    /// Name used in logs.
    pub name: String,
    /// Endpoint URL of the server.
    pub url: String,
    /// HTTP headers sent with every call.
    pub headers: Vec<(String, String)>,
    /// Per-call timeout. Uses the transport default when unset.
    pub timeout: Option<Duration>,
}

impl McpServerConfig {
    /// Create a new server config for HTTP transport.
    pub fn http(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            headers: Vec::new(),
            timeout: None,
        }
    }

    /// Add an HTTP header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn transport_config(&self) -> HttpTransportConfig {
        let mut config = HttpTransportConfig::new(&self.url);
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        for (key, value) in &self.headers {
            config = config.with_header(key, value);
        }
        config
    }
}

/// An MCP client bound to a single tool server.
///
/// Safe to share between tasks: the request id counter is the only mutable
/// state and is advanced atomically. Every call is independent; nothing is
/// cached or retried.
pub struct McpClient {
    /// Name used in logs.
    name: String,
    /// Transport for communicating with the server.
    transport: Arc<dyn Transport>,
    /// Counter for generating unique request IDs.
    ids: RequestIds,
}

impl McpClient {
    /// Connect to an MCP server over HTTP.
    ///
    /// No request is sent until the first call.
    pub fn connect_http(config: McpServerConfig) -> Result<Self> {
        let transport = HttpTransport::connect(config.transport_config())?;

        tracing::info!(
            server = %config.name,
            url = %transport.endpoint(),
            "connected to MCP server via HTTP"
        );

        Ok(Self::with_transport(config.name, Arc::new(transport)))
    }

    /// Build a client over an existing transport.
    pub fn with_transport(name: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            name: name.into(),
            transport,
            ids: RequestIds::new(),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the server endpoint.
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Send a request and decode the reply.
    async fn send_request(&self, method: &str, params: Map<String, Value>) -> Result<RpcReply> {
        let request = self.ids.build_request(method, params);
        let body = serde_json::to_vec(&request)
            .map_err(|e| McpError::unexpected(format!("failed to encode request: {}", e)))?;

        tracing::debug!(
            server = %self.name,
            id = request.id,
            method = %request.method,
            "sending JSON-RPC request"
        );

        let raw = self.transport.send(body).await?;
        let reply = codec::decode_response(&raw)?;

        if reply.is_ambiguous() {
            tracing::warn!(
                server = %self.name,
                id = request.id,
                "response has neither result nor error, using the whole body as the result"
            );
        }

        Ok(reply)
    }

    /// Call a tool on the server and normalize its result.
    ///
    /// # Arguments
    /// * `name` - The name of the tool to call
    /// * `arguments` - The arguments to pass to the tool
    pub async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> Result<ToolValue> {
        let params = CallToolParams {
            name: name.to_string(),
            arguments,
        };

        let reply = self
            .send_request(METHOD_TOOLS_CALL, params.into_params())
            .await?;

        if reply.result.get("isError").and_then(Value::as_bool) == Some(true) {
            tracing::warn!(
                server = %self.name,
                tool = %name,
                "tool call returned error"
            );
        } else {
            tracing::debug!(
                server = %self.name,
                tool = %name,
                "tool call succeeded"
            );
        }

        Ok(normalize::normalize(reply.result))
    }

    /// List the cities the server supports.
    pub async fn list_supported_cities(&self) -> Result<ToolValue> {
        self.call_tool(TOOL_LIST_SUPPORTED_CITIES, Map::new()).await
    }

    /// Get the current observation for a city.
    ///
    /// The city is passed through unchecked; an unknown city comes back as
    /// whatever the server returns, typically `{"ok": false, "error": ...}`.
    pub async fn get_now_weather(&self, city: &str) -> Result<ToolValue> {
        let mut arguments = Map::new();
        arguments.insert("city".to_string(), Value::String(city.to_string()));
        self.call_tool(TOOL_GET_NOW_WEATHER, arguments).await
    }

    /// List available tools from the server.
    pub async fn list_tools(&self) -> Result<Vec<ToolInfo>> {
        let reply = self.send_request(METHOD_TOOLS_LIST, Map::new()).await?;
        let list_result: ListToolsResult = serde_json::from_value(Value::Object(reply.result))
            .map_err(|e| McpError::malformed(format!("invalid tools/list result: {}", e)))?;

        tracing::debug!(
            server = %self.name,
            tool_count = list_result.tools.len(),
            "listed MCP tools"
        );

        Ok(list_result.tools)
    }

    /// Shut the connection down and release the transport.
    pub async fn close(self) -> Result<()> {
        tracing::info!(server = %self.name, "shutting down MCP client");
        self.transport.shutdown().await
    }
}
