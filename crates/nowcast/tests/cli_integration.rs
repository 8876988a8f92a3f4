//! CLI integration tests for the nowcast command-line interface.
//!
//! These tests verify:
//! - Help text and argument parsing
//! - Config layering (project file, env var, CLI flags)
//! - Commands against a wiremock MCP server, including error exit codes

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get a command for the nowcast binary, isolated from the user's config.
fn nowcast(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nowcast").unwrap();
    cmd.env("NOWCAST_CONFIG_DIR", config_dir.path())
        .env_remove("MCP_SERVER_URL")
        .current_dir(config_dir.path());
    cmd
}

fn text_result(text: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": {"content": [{"type": "text", "text": text}]}
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Parsing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cities"))
        .stdout(predicate::str::contains("weather"))
        .stdout(predicate::str::contains("tools"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_displays() {
    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nowcast"));
}

#[test]
fn test_global_flags_accepted() {
    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .args(["--verbose", "--json", "--mcp-url", "http://x/mcp", "--timeout", "5", "--help"])
        .assert()
        .success();
}

#[test]
fn test_ask_requires_text() {
    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .arg("ask")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_invalid_timeout_rejected() {
    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .args(["--timeout", "soon", "config", "show"])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_defaults() {
    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8000/mcp"))
        .stdout(predicate::str::contains("20s"))
        .stdout(predicate::str::contains("서울"));
}

#[test]
fn test_config_layers() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("nowcast.toml"),
        "[mcp]\nurl = \"https://project/mcp\"\ntimeout_secs = 7\n\n[agent]\ndefault_city = \"부산\"\n",
    )
    .unwrap();

    nowcast(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://project/mcp"))
        .stdout(predicate::str::contains("7s"))
        .stdout(predicate::str::contains("부산"));

    nowcast(&dir)
        .env("MCP_SERVER_URL", "https://env/mcp")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://env/mcp"));

    nowcast(&dir)
        .env("MCP_SERVER_URL", "https://env/mcp")
        .args(["--mcp-url", "https://flag/mcp", "--timeout", "3", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://flag/mcp"))
        .stdout(predicate::str::contains("3s"));
}

#[test]
fn test_zero_timeout_rejected() {
    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .args(["--timeout", "0", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mcp.timeout_secs"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands against a mock MCP server
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_weather_command() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .and(body_partial_json(json!({
            "params": {"name": "get_now_weather", "arguments": {"city": "대구"}}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_result(r#"{"ok": true, "city": "대구", "T1H": "25.1"}"#)),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .args(["--mcp-url", &format!("{}/mcp", server.uri()), "weather", "대구"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"T1H\": \"25.1\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_weather_tool_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_result(r#"{"ok": false, "error": "no data"}"#)),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .args(["--mcp-url", &format!("{}/mcp", server.uri()), "weather", "서울"])
        .assert()
        .success()
        .stdout(predicate::str::contains("조회 실패: no data"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cities_command_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {"structuredContent": {"supported_cities": ["서울", "부산"]}}
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .args(["--json", "--mcp-url", &format!("{}/mcp", server.uri()), "cities"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"supported_cities\""))
        .stdout(predicate::str::contains("부산"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_tools_command() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .and(body_partial_json(json!({"method": "tools/list"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {"tools": [{"name": "get_now_weather", "description": "초단기실황"}]}
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .args(["--mcp-url", &format!("{}/mcp", server.uri()), "tools"])
        .assert()
        .success()
        .stdout(predicate::str::contains("get_now_weather"))
        .stdout(predicate::str::contains("초단기실황"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_protocol_error_exits_non_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32602, "message": "bad city"}
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .args(["--mcp-url", &format!("{}/mcp", server.uri()), "weather", "서울"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[protocol]"))
        .stderr(predicate::str::contains("bad city"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_renders_errors_and_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .args(["--mcp-url", &format!("{}/mcp", server.uri()), "ask", "부산", "날씨"])
        .assert()
        .success()
        .stdout(predicate::str::contains("에이전트 오류(http_status)"))
        .stdout(predicate::str::contains("maintenance"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_city_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .and(body_partial_json(json!({"params": {"name": "list_supported_cities"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_result(
            r#"{"supported_cities": ["서울", "부산", "대구"]}"#,
        )))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    nowcast(&dir)
        .args(["--mcp-url", &format!("{}/mcp", server.uri()), "ask", "지원 도시 목록"])
        .assert()
        .success()
        .stdout(predicate::str::contains("지원 도시: 서울, 부산, 대구"));
}
