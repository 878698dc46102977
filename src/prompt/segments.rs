//! Transcript segments and time codes.

use serde::{Deserialize, Serialize};

/// One timed piece of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds.
    pub end: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Format an offset as `MM:SS`, or `H:MM:SS` from one hour on.
///
/// Fractions are truncated; negative offsets clamp to zero.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// One `"{time} - {text}"` line per segment.
pub fn build_segment_text(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|seg| format!("{} - {}", format_time(seg.start), seg.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
