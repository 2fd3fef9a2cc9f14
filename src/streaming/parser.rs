//! Incremental SSE parser for streaming responses
//!
//! Turns a stream of byte chunks into server-sent events:
//! - Lines may be split across chunks and may end in CRLF
//! - Only `data:` fields are reported; comments and other fields are skipped
//! - `data: [DONE]` marks the end of the stream
//! - Buffer: 1MB maximum for a single unterminated line

use crate::errors::{LookupError, Result};

/// Maximum buffer size (1MB)
pub const MAX_BUFFER_SIZE: usize = 1_048_576;

/// Payload announcing the end of a chat stream
pub const DONE_MARKER: &str = "[DONE]";

/// One parsed event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// Payload of a `data:` line
    Data(String),

    /// End-of-stream marker
    Done,
}

/// Incremental SSE parser
#[derive(Debug)]
pub struct SseParser {
    /// Bytes of the current, unterminated line
    buffer: Vec<u8>,

    /// Maximum buffer size
    max_buffer_size: usize,
}

impl SseParser {
    /// Create new SSE parser with default settings
    pub fn new() -> Self {
        Self::with_capacity(MAX_BUFFER_SIZE)
    }

    /// Create parser with custom buffer capacity
    pub fn with_capacity(max_buffer_size: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            max_buffer_size,
        }
    }

    /// Add bytes to parser and return every event completed by them
    pub fn add_bytes(&mut self, bytes: &[u8]) -> Result<Vec<SseEvent>> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            if let Some(event) = parse_line(&line) {
                events.push(event);
            }
        }

        if self.buffer.len() > self.max_buffer_size {
            let size = self.buffer.len();
            self.buffer.clear();
            return Err(LookupError::StreamingError(format!(
                "Buffer overflow: {} bytes exceeds maximum {}",
                size, self.max_buffer_size
            )));
        }

        Ok(events)
    }

    /// Parse whatever is left once the byte stream has ended
    pub fn finish(&mut self) -> Option<SseEvent> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.buffer);
        parse_line(&line)
    }
}

impl Default for SseParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_line(line: &[u8]) -> Option<SseEvent> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');

    let payload = line.strip_prefix("data:")?;
    let payload = payload.strip_prefix(' ').unwrap_or(payload);

    if payload.trim() == DONE_MARKER {
        Some(SseEvent::Done)
    } else if payload.is_empty() {
        None
    } else {
        Some(SseEvent::Data(payload.to_string()))
    }
}
