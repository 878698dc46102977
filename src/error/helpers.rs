//! Error classification helpers.

use super::LlmError;
use reqwest::header::HeaderMap;

const REQUEST_ID_HEADERS: [&str; 4] = ["x-request-id", "x-trace-id", "traceparent", "x-correlation-id"];

/// Classify a non-2xx chat response into an [`LlmError::ApiError`].
///
/// Every status is terminal for the chat call, 401 included: the gateway
/// reports expired credentials inside the stream, not through the status line.
pub fn classify_http_error(status: u16, body_text: &str, headers: &HeaderMap) -> LlmError {
    let request_ids: Vec<String> = REQUEST_ID_HEADERS
        .iter()
        .filter_map(|k| {
            headers
                .get(*k)
                .and_then(|v| v.to_str().ok())
                .map(|v| format!("{k}={v}"))
        })
        .collect();
    // Body sample is capped at 200 chars.
    let body_sample = body_text.chars().take(200).collect::<String>();

    let message = if body_sample.trim().is_empty() {
        format!("http={status}")
    } else {
        format!("http={status} body_sample={body_sample}")
    };

    let details = match serde_json::from_str::<serde_json::Value>(body_text) {
        Ok(json) => serde_json::json!({
            "status": status,
            "response": json,
            "request_ids": request_ids,
        }),
        Err(_) => serde_json::json!({
            "status": status,
            "raw": body_sample,
            "request_ids": request_ids,
        }),
    };
    LlmError::api_error_with_details(status, message, details)
}
