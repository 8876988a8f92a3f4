//! Configuration system for the nowcast weather agent.
//!
//! Provides TOML-based configuration with:
//! - An `[mcp]` section naming the weather tool server and its timeout
//! - An `[agent]` section for dispatch defaults
//! - Config file layering (user config dir + project-local override)
//! - `MCP_SERVER_URL` environment override

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{
    ConfigSource, LoadedConfig, MCP_URL_ENV, apply_env_overrides, apply_overrides_from,
    load_config, load_config_file, load_config_with_options, xdg_config_dir, xdg_config_path,
};
pub use error::{ConfigError, Result};
pub use types::*;
