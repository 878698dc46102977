//! Error Handling Module
//!
//! - Core error type (`LlmError`)
//! - HTTP status classification for the chat endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use note_gpt::error::LlmError;
//!
//! let error = LlmError::api_error(502, "bad gateway");
//! assert!(!error.is_auth_error());
//! ```

pub mod helpers;
pub mod types;

pub use helpers::*;
pub use types::*;
