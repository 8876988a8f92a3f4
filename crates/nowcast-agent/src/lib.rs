//! Free-text dispatch for the nowcast weather agent.
//!
//! Turns a short request such as "부산 실황 보여줘" or "지원 도시 목록" into a
//! single MCP tool call and renders the result, or the classified error, as
//! text.
//!
//! ```text
//! text ──► Intent::classify ──► McpClient ──► render ──► reply
//!              │
//!              └── CityLexicon (fixed city table + aliases)
//! ```

pub mod agent;
pub mod intent;
pub mod lexicon;
pub mod render;

pub use agent::WeatherAgent;
pub use intent::Intent;
pub use lexicon::{CityLexicon, KoreanMetroLexicon};
