//! Chat-completion streaming client
//!
//! Sends one single-turn chat request with `stream: true` and exposes the
//! reply as a [`Streamer`] of text fragments:
//! - HTTP/1.1 streaming via reqwest
//! - Endpoint: POST {api_base}/chat/completions
//! - Framing: server-sent events, terminated by `data: [DONE]`

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::pin::Pin;
use tracing::debug;

use crate::cli::Config;
use crate::errors::{LookupError, Result};
use crate::lookup::{Answer, Query, Translator};
use crate::streaming::parser::{SseEvent, SseParser};
use crate::streaming::prompt::build_prompt;
use crate::streaming::streamer::Streamer;

/// Chat-completion translator
#[derive(Debug, Clone)]
pub struct ChatTranslator {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    template: String,
}

impl ChatTranslator {
    /// Create translator from configuration
    ///
    /// Fails without a credential so that nothing is ever sent unauthenticated.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            LookupError::ConfigError("chat backend needs an API key".to_string())
        })?;

        let client = Client::builder()
            .build()
            .map_err(LookupError::HttpError)?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            template: config.prompt_template().to_string(),
        })
    }

    /// Open a streaming completion for `prompt`
    pub async fn complete_stream(&self, prompt: String) -> Result<OpenAiStreamer> {
        let url = format!("{}/chat/completions", self.api_base);

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            stream: true,
        };

        debug!(url = %url, model = %self.model, "opening chat completion stream");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LookupError::ApiError {
                status: status.as_u16(),
                message: api_error_message(&error_text),
            });
        }

        debug!(status = %status, "chat completion stream opened");
        Ok(OpenAiStreamer::new(response.bytes_stream()))
    }

}

#[async_trait]
impl Translator for ChatTranslator {
    async fn lookup(&self, query: &Query) -> Result<Answer> {
        let prompt = build_prompt(&self.template, query.as_str());
        let streamer = self.complete_stream(prompt).await?;
        Ok(Answer::Stream(Box::new(streamer)))
    }
}

type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Fragments of one chat completion, read off an SSE body
pub struct OpenAiStreamer {
    body: Option<ByteStream>,
    parser: SseParser,
    pending: VecDeque<String>,
    finished: bool,
    deferred: Option<LookupError>,
    received: usize,
}

impl OpenAiStreamer {
    /// Wrap a byte stream carrying SSE frames
    pub fn new<S, E>(stream: S) -> Self
    where
        S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
        E: std::fmt::Display,
    {
        let body = stream.map(|result| {
            result.map_err(|e| LookupError::StreamingError(e.to_string()))
        });

        Self {
            body: Some(Box::pin(body)),
            parser: SseParser::new(),
            pending: VecDeque::new(),
            finished: false,
            deferred: None,
            received: 0,
        }
    }

    /// Queue the fragments of a batch of events
    ///
    /// Stops at the first bad frame. Its error is held back until the
    /// fragments queued ahead of it have been handed out.
    fn absorb(&mut self, events: Vec<SseEvent>) {
        for event in events {
            match event {
                SseEvent::Done => {
                    self.finished = true;
                    break;
                }
                SseEvent::Data(payload) => match parse_fragment(&payload) {
                    Ok(Some(fragment)) => self.pending.push_back(fragment),
                    Ok(None) => {}
                    Err(e) => {
                        self.finished = true;
                        self.deferred = Some(e);
                        break;
                    }
                },
            }
        }
    }
}

#[async_trait]
impl Streamer for OpenAiStreamer {
    async fn recv(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(fragment) = self.pending.pop_front() {
                self.received += 1;
                return Ok(Some(fragment));
            }
            if let Some(err) = self.deferred.take() {
                return Err(err);
            }
            if self.finished {
                return Ok(None);
            }

            let next = match self.body.as_mut() {
                Some(body) => body.next().await,
                None => return Ok(None),
            };

            match next {
                Some(Ok(bytes)) => match self.parser.add_bytes(&bytes) {
                    Ok(events) => self.absorb(events),
                    Err(e) => {
                        self.finished = true;
                        return Err(e);
                    }
                },
                Some(Err(e)) => {
                    self.finished = true;
                    return Err(e);
                }
                None => {
                    self.finished = true;
                    if let Some(event) = self.parser.finish() {
                        self.absorb(vec![event]);
                    }
                }
            }
        }
    }

    fn close(&mut self) {
        if self.body.take().is_some() {
            debug!(fragments = self.received, "chat completion stream closed");
        }
        self.finished = true;
        self.pending.clear();
        self.deferred = None;
    }
}

/// Extract the text fragment of one chunk payload
///
/// Chunks without choices or content carry no text and yield `None`.
fn parse_fragment(payload: &str) -> Result<Option<String>> {
    let chunk: ChatCompletionChunk = serde_json::from_str(payload)?;

    if let Some(error) = chunk.error {
        return Err(LookupError::StreamingError(format!(
            "provider error: {}",
            error.message
        )));
    }

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty()))
}

/// Pull the human-readable message out of an error body
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Chat completion request
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// One streamed chunk
#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}
