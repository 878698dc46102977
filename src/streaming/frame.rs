//! Data frame decoding
//!
//! Each `data:` line of the response stream becomes exactly one
//! [`StreamFrame`]. Lines without the prefix and blank lines produce nothing.

use serde::Deserialize;

use crate::defaults::stream::{AUTH_SENTINEL, DATA_PREFIX, DONE_MARKER};

/// One decoded unit of the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    /// Incremental completion text. Empty when the chunk carried no content.
    ContentDelta(String),
    /// An `error` field embedded in the stream.
    ErrorSignal(String),
    /// The terminal `[DONE]` marker.
    Done,
    /// The payload could not be decoded; carries the reason.
    Unparseable(String),
}

impl StreamFrame {
    /// Decode one raw line. Returns `None` for lines that are not data frames.
    pub fn from_line(line: &str) -> Option<Self> {
        let payload = line.strip_prefix(DATA_PREFIX)?.trim();
        if payload.is_empty() {
            return None;
        }
        if payload == DONE_MARKER {
            return Some(Self::Done);
        }
        Some(Self::decode_payload(payload))
    }

    fn decode_payload(payload: &str) -> Self {
        let chunk: CompletionChunk = match serde_json::from_str(payload) {
            Ok(chunk) => chunk,
            Err(e) => return Self::Unparseable(e.to_string()),
        };
        if let Some(error) = chunk.error {
            return Self::ErrorSignal(error.into_message());
        }
        let content = chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content)
            .unwrap_or_default();
        Self::ContentDelta(content)
    }

    /// Whether this frame reports the stale-credential condition.
    pub fn is_auth_sentinel(&self) -> bool {
        matches!(self, Self::ErrorSignal(message) if message.contains(AUTH_SENTINEL))
    }
}

#[derive(Debug, Deserialize)]
struct CompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<ChunkError>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChunkError {
    Text(String),
    Object { message: String },
    Other(serde_json::Value),
}

impl ChunkError {
    fn into_message(self) -> String {
        match self {
            Self::Text(message) | Self::Object { message } => message,
            Self::Other(value) => value.to_string(),
        }
    }
}
