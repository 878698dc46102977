//! Streaming response handling
//!
//! - [`lines`]: split a response body into raw lines
//! - [`frame`]: decode one `data:` line into a [`StreamFrame`]
//! - [`consumer`]: fold a line stream into a [`ConsumeResult`]

pub mod consumer;
pub mod frame;
pub mod lines;

pub use consumer::{ConsumeResult, StreamConsumer};
pub use frame::StreamFrame;
pub use lines::{LineStream, byte_lines, response_lines};
