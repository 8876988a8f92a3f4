//! Rendering of tool values and classified errors as user-facing text.

use nowcast_mcp::{McpError, ToolValue};
use serde_json::Value;

/// Reply to an empty request.
pub const EMPTY_INPUT_PROMPT: &str = "도시명을 입력해 주세요. 예) 서울, 부산, 대구";

/// Failure reason shown when a tool reports `ok: false` without an error message.
pub const UNKNOWN_FAILURE: &str = "알 수 없는 오류";

/// Field carrying the supported city list.
const SUPPORTED_CITIES_KEY: &str = "supported_cities";

/// Parse a string value that itself holds JSON; anything else is returned unchanged.
pub fn unwrap_json_string(value: Value) -> Value {
    match value {
        Value::String(s) => serde_json::from_str(s.trim()).unwrap_or(Value::String(s)),
        other => other,
    }
}

/// Render the reply to a city-list request.
pub fn render_cities(value: ToolValue) -> String {
    let value = ToolValue::new(unwrap_json_string(value.into_value()));
    match value.string_list(SUPPORTED_CITIES_KEY) {
        Some(cities) => format!("지원 도시: {}", cities.join(", ")),
        None => render_plain(value.as_value()),
    }
}

/// Render the reply to a current-weather request.
pub fn render_weather(value: ToolValue) -> String {
    let value = ToolValue::new(unwrap_json_string(value.into_value()));
    if value.is_failure() {
        let reason = value.error_message().unwrap_or(UNKNOWN_FAILURE);
        return format!("조회 실패: {reason}");
    }
    render_plain(value.as_value())
}

/// Render a classified error.
pub fn render_error(err: &McpError) -> String {
    format!("에이전트 오류({}): {}", err.kind(), err)
}

/// Strings as is, everything else as indented JSON.
fn render_plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_cities_list() {
        let value = ToolValue::new(json!({"supported_cities": ["서울", "부산"]}));
        assert_eq!(render_cities(value), "지원 도시: 서울, 부산");
    }

    #[test]
    fn test_cities_from_json_string() {
        let value = ToolValue::new(json!(r#"{"supported_cities": ["대구"]}"#));
        assert_eq!(render_cities(value), "지원 도시: 대구");
    }

    #[test]
    fn test_cities_without_list_falls_back_to_json() {
        let value = ToolValue::new(json!({"text": "목록 없음"}));
        assert_eq!(render_cities(value), "{\n  \"text\": \"목록 없음\"\n}");
    }

    #[test]
    fn test_weather_failure() {
        let value = ToolValue::new(json!({"ok": false, "error": "지원하지 않는 도시"}));
        assert_eq!(render_weather(value), "조회 실패: 지원하지 않는 도시");

        let value = ToolValue::new(json!({"ok": false}));
        assert_eq!(render_weather(value), "조회 실패: 알 수 없는 오류");
    }

    #[test]
    fn test_weather_success_is_pretty_json() {
        let value = ToolValue::new(json!({"ok": true, "city": "서울"}));
        let rendered = render_weather(value);
        assert!(rendered.contains("\"city\": \"서울\""));
        assert!(rendered.contains('\n'));
    }

    #[test]
    fn test_plain_string_is_returned_as_is() {
        let value = ToolValue::new(json!("맑음"));
        assert_eq!(render_weather(value), "맑음");
    }

    #[test]
    fn test_error_rendering() {
        let err = McpError::protocol("bad city");
        assert_eq!(render_error(&err), "에이전트 오류(protocol): protocol error: bad city");

        let err = McpError::Timeout(Duration::from_secs(20));
        assert_eq!(
            render_error(&err),
            "에이전트 오류(transport): request timed out after 20s"
        );
    }
}
