//! Streaming chat-completion backend
//! 
//! Provides the chat-completion client, the incremental SSE parser and the
//! [`Streamer`] abstraction the REPL consumes fragments through.

pub mod client;
pub mod parser;
pub mod prompt;
pub mod streamer;

// Re-export commonly used types
pub use client::{ChatTranslator, OpenAiStreamer};
pub use parser::{SseEvent, SseParser, MAX_BUFFER_SIZE};
pub use prompt::{build_prompt, DEFAULT_PROMPT};
pub use streamer::{ScriptedStreamer, Streamer};
