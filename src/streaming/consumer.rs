//! Stream consumption
//!
//! Reads a line stream to completion (or to the first stale-credential
//! signal) and reassembles the completion text.

use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};

use super::StreamFrame;
use crate::error::LlmError;

/// Outcome of consuming one response stream.
#[derive(Debug)]
pub enum ConsumeResult {
    /// Accumulated text, in arrival order, untrimmed.
    Completed(String),
    /// The first decoded frame carried the auth sentinel. Any text read so far
    /// has been discarded.
    AuthRequired,
    /// Reading the stream failed.
    Fatal(LlmError),
}

/// Consumes line streams produced by [`super::response_lines`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamConsumer {
    read_timeout: Option<Duration>,
}

impl StreamConsumer {
    pub const fn new() -> Self {
        Self { read_timeout: None }
    }

    /// Fail with [`LlmError::TimeoutError`] when no line arrives within
    /// `timeout`. The limit applies to each read, not to the whole stream.
    pub const fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub const fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    /// Consume `lines` and produce exactly one [`ConsumeResult`].
    ///
    /// The stream is taken by value and dropped before this returns, so the
    /// underlying connection is released on every exit path.
    pub async fn consume<S>(&self, lines: S) -> ConsumeResult
    where
        S: Stream<Item = Result<Bytes, LlmError>> + Unpin,
    {
        let mut lines = lines;
        let mut text = String::new();
        let mut seen_decoded = false;

        while let Some(item) = self.next_line(&mut lines).await {
            let raw = match item {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(target: "note_gpt::stream", err = %e, "stream read failed");
                    return ConsumeResult::Fatal(e);
                }
            };
            let line = match std::str::from_utf8(&raw) {
                Ok(line) => line.trim_end_matches('\r'),
                Err(e) => {
                    tracing::warn!(target: "note_gpt::stream", err = %e, "skipping line that is not valid UTF-8");
                    continue;
                }
            };
            let Some(frame) = StreamFrame::from_line(line) else {
                continue;
            };

            match frame {
                StreamFrame::Done => return ConsumeResult::Completed(text),
                StreamFrame::Unparseable(reason) => {
                    tracing::warn!(target: "note_gpt::stream", %reason, line = %line, "skipping undecodable frame");
                }
                frame => {
                    // Only the first decoded frame is checked for the sentinel.
                    let first = !std::mem::replace(&mut seen_decoded, true);
                    if first && frame.is_auth_sentinel() {
                        tracing::info!(target: "note_gpt::stream", "credential rejected in first frame, abandoning stream");
                        return ConsumeResult::AuthRequired;
                    }
                    match frame {
                        StreamFrame::ContentDelta(delta) => text.push_str(&delta),
                        StreamFrame::ErrorSignal(message) => {
                            tracing::warn!(target: "note_gpt::stream", %message, "error reported in stream, continuing");
                        }
                        StreamFrame::Done | StreamFrame::Unparseable(_) => {}
                    }
                }
            }
        }

        tracing::debug!(target: "note_gpt::stream", chars = text.len(), "stream ended without done marker");
        ConsumeResult::Completed(text)
    }

    async fn next_line<S>(&self, lines: &mut S) -> Option<Result<Bytes, LlmError>>
    where
        S: Stream<Item = Result<Bytes, LlmError>> + Unpin,
    {
        let Some(limit) = self.read_timeout else {
            return lines.next().await;
        };
        match tokio::time::timeout(limit, lines.next()).await {
            Ok(item) => item,
            Err(_) => Some(Err(LlmError::TimeoutError(format!(
                "no data received from stream for {limit:?}"
            )))),
        }
    }
}
