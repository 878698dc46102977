//! Request and message types sent to the chat endpoint.

mod chat;

pub use chat::{ChatMessage, ChatRequest, GenerationParams, MessageRole};
