//! Incremental fragment delivery
//!
//! A [`Streamer`] hands out fragments one at a time and must be closed by
//! whoever consumed it, however consumption ended.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::Result;

/// Live sequence of text fragments
#[async_trait]
pub trait Streamer: Send {
    /// Wait for the next fragment
    ///
    /// `Ok(None)` is end-of-stream and is distinct from an error. After
    /// either, the sequence is spent.
    async fn recv(&mut self) -> Result<Option<String>>;

    /// Release the underlying transport
    fn close(&mut self);
}

/// Streamer replaying a fixed script, for deterministic tests and demos
#[derive(Debug)]
pub struct ScriptedStreamer {
    script: VecDeque<Result<String>>,
    closes: Arc<AtomicUsize>,
}

impl ScriptedStreamer {
    /// Replay `fragments` then end the stream
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_script(fragments.into_iter().map(|f| Ok(f.into())))
    }

    /// Replay arbitrary outcomes, errors included
    pub fn from_script<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Result<String>>,
    {
        Self {
            script: script.into_iter().collect(),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of `close` calls, readable after the streamer is gone
    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closes)
    }
}

#[async_trait]
impl Streamer for ScriptedStreamer {
    async fn recv(&mut self) -> Result<Option<String>> {
        match self.script.pop_front() {
            Some(Ok(fragment)) => Ok(Some(fragment)),
            Some(Err(err)) => {
                self.script.clear();
                Err(err)
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.script.clear();
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
