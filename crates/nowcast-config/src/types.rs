//! Configuration types mapping to the TOML schema.
//!
//! ```toml
//! [mcp]
//! url = "https://weather.example.com/mcp"
//! timeout_secs = 20
//!
//! [mcp.headers]
//! Authorization = "Bearer ..."
//!
//! [agent]
//! default_city = "서울"
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

/// Endpoint used when no MCP server URL is configured anywhere.
pub const DEFAULT_MCP_URL: &str = "http://localhost:8000/mcp";

/// Default per-call timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// City used when a weather request names no known city.
pub const DEFAULT_CITY: &str = "서울";

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// All sections are optional so that partial configs (e.g., project-local
/// overrides) can be loaded and merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NowcastConfig {
    /// MCP weather server connection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcp: Option<McpConfig>,

    /// Dispatch-layer settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentConfig>,
}

impl NowcastConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    pub fn merge(&mut self, other: NowcastConfig) {
        if let Some(layer) = other.mcp {
            match self.mcp.as_mut() {
                Some(base) => base.merge(layer),
                None => self.mcp = Some(layer),
            }
        }

        if other.agent.is_some() {
            self.agent = other.agent;
        }
    }

    /// Check values that would only fail later, at connect time.
    pub fn validate(&self) -> Result<()> {
        if let Some(mcp) = &self.mcp {
            if mcp.timeout_secs == Some(0) {
                return Err(ConfigError::InvalidValue {
                    field: "mcp.timeout_secs".to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
            if let Some(url) = &mcp.url
                && url.trim().is_empty()
            {
                return Err(ConfigError::InvalidValue {
                    field: "mcp.url".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Effective MCP server URL.
    pub fn mcp_url(&self) -> &str {
        self.mcp
            .as_ref()
            .and_then(|m| m.url.as_deref())
            .unwrap_or(DEFAULT_MCP_URL)
    }

    /// Effective per-call timeout.
    pub fn timeout(&self) -> Duration {
        let secs = self
            .mcp
            .as_ref()
            .and_then(|m| m.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// Extra HTTP headers for the MCP server.
    pub fn headers(&self) -> Vec<(String, String)> {
        self.mcp
            .as_ref()
            .map(|m| {
                m.headers
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// City used when a request names none.
    pub fn default_city(&self) -> &str {
        self.agent
            .as_ref()
            .and_then(|a| a.default_city.as_deref())
            .unwrap_or(DEFAULT_CITY)
    }

    /// Set the MCP server URL, creating the section if needed.
    pub fn set_mcp_url(&mut self, url: impl Into<String>) {
        self.mcp.get_or_insert_with(McpConfig::default).url = Some(url.into());
    }

    /// Set the per-call timeout, creating the section if needed.
    pub fn set_timeout_secs(&mut self, secs: u64) {
        self.mcp.get_or_insert_with(McpConfig::default).timeout_secs = Some(secs);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

/// MCP server connection settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpConfig {
    /// Endpoint URL, e.g. `https://weather.example.com/mcp`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Per-call timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Extra HTTP headers.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl McpConfig {
    /// Field-wise merge; set fields in `other` win, headers accumulate.
    pub fn merge(&mut self, other: McpConfig) {
        if other.url.is_some() {
            self.url = other.url;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        self.headers.extend(other.headers);
    }
}

/// Dispatch-layer settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// City used when a weather request names none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_city: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_defaults() {
        let config = NowcastConfig::from_toml("").unwrap();
        assert_eq!(config.mcp_url(), DEFAULT_MCP_URL);
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert_eq!(config.default_city(), "서울");
        assert!(config.headers().is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let config = NowcastConfig::from_toml(
            r#"
[mcp]
url = "https://svc/mcp"
timeout_secs = 15

[mcp.headers]
Authorization = "Bearer abc"

[agent]
default_city = "부산"
"#,
        )
        .unwrap();

        assert_eq!(config.mcp_url(), "https://svc/mcp");
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(
            config.headers(),
            vec![("Authorization".to_string(), "Bearer abc".to_string())]
        );
        assert_eq!(config.default_city(), "부산");
    }

    #[test]
    fn test_merge_is_field_wise_for_mcp() {
        let mut base = NowcastConfig::from_toml(
            r#"
[mcp]
url = "https://base/mcp"
timeout_secs = 15

[mcp.headers]
X-Base = "1"
"#,
        )
        .unwrap();
        let layer = NowcastConfig::from_toml(
            r#"
[mcp]
url = "https://project/mcp"

[mcp.headers]
X-Project = "2"
"#,
        )
        .unwrap();

        base.merge(layer);
        assert_eq!(base.mcp_url(), "https://project/mcp");
        assert_eq!(base.timeout(), Duration::from_secs(15));
        assert_eq!(base.headers().len(), 2);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = NowcastConfig::from_toml("[mcp]\ntimeout_secs = 0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("mcp.timeout_secs"));
    }

    #[test]
    fn test_validate_rejects_blank_url() {
        let config = NowcastConfig::from_toml("[mcp]\nurl = \"  \"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_setters_create_section() {
        let mut config = NowcastConfig::new();
        config.set_mcp_url("https://cli/mcp");
        config.set_timeout_secs(5);
        assert_eq!(config.mcp_url(), "https://cli/mcp");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_toml_roundtrip_skips_unset() {
        let mut config = NowcastConfig::new();
        config.set_mcp_url("https://svc/mcp");
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("url = \"https://svc/mcp\""));
        assert!(!toml.contains("timeout_secs"));
        assert_eq!(NowcastConfig::from_toml(&toml).unwrap(), config);
    }
}
