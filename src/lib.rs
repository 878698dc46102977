//! # note-gpt
//!
//! Streaming note summarization against a cookie-authenticated, OpenAI-style
//! chat completion gateway.
//!
//! The gateway reports an expired session inside the first event of its
//! response stream rather than through the HTTP status. The client detects
//! that signal, abandons the stream, exchanges an external token for a fresh
//! session cookie, and resends the request, a bounded number of times.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use note_gpt::{NoteGptClient, NoteSource, TranscriptSegment};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), note_gpt::LlmError> {
//!     let client = NoteGptClient::from_env()?;
//!     let source = NoteSource::new(
//!         "Rust ownership",
//!         "rust",
//!         vec![TranscriptSegment::new(0.0, 12.5, "Every value has a single owner.")],
//!     )
//!     .with_link(true);
//!     println!("{}", client.summarize(&source).await?);
//!     Ok(())
//! }
//! ```
#![deny(unsafe_code)]

pub mod auth;
mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod session;
pub mod streaming;
pub mod types;

pub use auth::{AuthFlow, CredentialRefresher};
pub use client::NoteGptClient;
pub use config::{AuthConfig, NoteGptConfig};
pub use error::LlmError;
pub use orchestrator::{OrchestratorOptions, RetryOrchestrator};
pub use prompt::{NoteSource, TranscriptSegment};
pub use session::Session;
pub use streaming::{ConsumeResult, StreamConsumer, StreamFrame};
pub use types::{ChatMessage, ChatRequest, GenerationParams, MessageRole};
