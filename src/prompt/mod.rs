//! Note request construction
//!
//! Turns a transcript plus its metadata into the system/user message pair
//! sent to the chat endpoint.

mod segments;
pub mod templates;

pub use segments::{TranscriptSegment, build_segment_text, format_time};

use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, ChatRequest, GenerationParams};

/// Everything needed to ask for notes on one video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteSource {
    pub title: String,
    pub tags: String,
    pub segments: Vec<TranscriptSegment>,
    /// Ask the model for screenshot cues.
    #[serde(default)]
    pub screenshot: bool,
    /// Ask the model for time markers on headings.
    #[serde(default)]
    pub link: bool,
}

impl NoteSource {
    pub fn new(title: impl Into<String>, tags: impl Into<String>, segments: Vec<TranscriptSegment>) -> Self {
        Self {
            title: title.into(),
            tags: tags.into(),
            segments,
            ..Default::default()
        }
    }

    pub fn with_screenshot(mut self, screenshot: bool) -> Self {
        self.screenshot = screenshot;
        self
    }

    pub fn with_link(mut self, link: bool) -> Self {
        self.link = link;
        self
    }

    /// System and user messages for this source.
    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut system = templates::SYSTEM_PROMPT
            .replace("{video_title}", &self.title)
            .replace("{tags}", &self.tags);
        if self.screenshot {
            system.push_str("\n\n");
            system.push_str(templates::SCREENSHOT_PROMPT);
        }
        if self.link {
            system.push_str("\n\n");
            system.push_str(templates::LINK_PROMPT);
        }

        let user = format!(
            "{}\n\n---\n{}\n---\n\n{}",
            templates::TRANSCRIPT_HEADER,
            build_segment_text(&self.segments),
            templates::SUMMARY_PROMPT
        );

        vec![ChatMessage::system(system), ChatMessage::user(user)]
    }

    /// A fresh chat request for this source.
    pub fn to_request(&self, params: &GenerationParams) -> ChatRequest {
        ChatRequest::new(self.messages(), params)
    }
}
