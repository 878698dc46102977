//! Test fixtures utilities: build gateway SSE bodies and mock servers
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use note_gpt::NoteGptConfig;
use wiremock::ResponseTemplate;

pub const CHAT_PATH: &str = "/api/chat/completions";
pub const AUTH_PATH: &str = "/api/auth/github";
pub const SENTINEL_FRAME: &str = r#"data: {"error":"No valid token available"}"#;

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("gateway")
}

/// Load a `.chunks.txt` fixture as a raw SSE body.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_dir().join(name)).expect("read fixture text")
}

/// A `data:` line carrying one content fragment.
pub fn delta_frame(content: &str) -> String {
    let chunk = serde_json::json!({"choices": [{"index": 0, "delta": {"content": content}}]});
    format!("data: {chunk}")
}

/// Join frames into an SSE body, each followed by a blank line.
pub fn sse_body<S: AsRef<str>>(frames: &[S]) -> String {
    frames
        .iter()
        .map(|f| format!("{}\n\n", f.as_ref()))
        .collect()
}

/// Body streaming `fragments` in order, then `[DONE]`.
pub fn completion_body(fragments: &[&str]) -> String {
    let mut frames: Vec<String> = fragments.iter().map(|f| delta_frame(f)).collect();
    frames.push("data: [DONE]".to_string());
    sse_body(&frames)
}

/// Body whose first frame reports the stale-credential sentinel.
pub fn sentinel_body() -> String {
    sse_body(&[SENTINEL_FRAME])
}

pub fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}

pub fn config_for(uri: &str) -> NoteGptConfig {
    NoteGptConfig::new(uri).with_auth_token("ext-token")
}
