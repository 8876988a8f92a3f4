//! MCP tool-invocation client for the nowcast weather agent.
//!
//! This crate calls tools on a remote MCP weather server over plain HTTP
//! JSON-RPC and turns whatever envelope the server answers with into one
//! canonical JSON value.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  McpClient                                                  │
//! │  - list_supported_cities, get_now_weather, tools/list       │
//! │  - owns the request id counter                              │
//! └─────────────────────────────────────────────────────────────┘
//!          │ build request                 ▲ normalize result
//!          ▼                               │
//! ┌──────────────────────┐   ┌──────────────────────────────────┐
//! │  codec               │   │  normalize                       │
//! │  - JSON-RPC envelope │   │  - structuredContent             │
//! │  - error detection   │   │  - content[0].text (JSON or not) │
//! └──────────────────────┘   │  - passthrough                   │
//!          │                 └──────────────────────────────────┘
//!          ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Transport                                                  │
//! │  - one HTTP POST per call, fixed timeout, redirects         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use nowcast_mcp::{McpClient, McpServerConfig};
//!
//! let client = McpClient::connect_http(McpServerConfig::http("kma", "https://svc/mcp"))?;
//!
//! let weather = client.get_now_weather("서울").await?;
//! if weather.is_failure() {
//!     println!("lookup failed: {:?}", weather.error_message());
//! } else {
//!     println!("{}", weather.to_pretty_json());
//! }
//!
//! client.close().await?;
//! ```
//!
//! # Errors
//!
//! Every failure is an [`McpError`]; [`McpError::kind`] groups them into
//! transport, HTTP status, protocol and unexpected failures.

pub mod client;
pub mod codec;
pub mod error;
pub mod mock;
pub mod normalize;
pub mod protocol;
pub mod transport;

// Re-export main types
pub use client::{McpClient, McpServerConfig, TOOL_GET_NOW_WEATHER, TOOL_LIST_SUPPORTED_CITIES};
pub use codec::{ReplyShape, RequestIds, RpcReply, decode_response};
pub use error::{ErrorKind, McpError, Result};
pub use mock::MockTransport;
pub use normalize::{ToolPayload, ToolValue, normalize};
pub use protocol::{CallToolParams, JsonRpcError, JsonRpcRequest, ListToolsResult, ToolInfo};
pub use transport::{DEFAULT_TIMEOUT, HttpTransport, HttpTransportConfig, Transport};
