//! Lookup types shared by every backend
//!
//! A [`Query`] goes in, an [`Answer`] comes out. Backends implement
//! [`Translator`]; the REPL only ever talks to the trait.

use async_trait::async_trait;
use std::fmt;

use crate::cli::{Config, Mode};
use crate::dictionary::{DictStyle, DictTranslator};
use crate::errors::Result;
use crate::streaming::{ChatTranslator, Streamer};

/// Text sent to a backend, trimmed and never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trim `raw`; blank input yields `None`
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Query(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one lookup
pub enum Answer {
    /// One aggregated block
    Text(String),
    /// Entries printed one per line
    Lines(Vec<String>),
    /// Nothing to print
    NotFound,
    /// Fragments delivered as they are generated
    Stream(Box<dyn Streamer>),
}

impl fmt::Debug for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Answer::Lines(lines) => f.debug_tuple("Lines").field(lines).finish(),
            Answer::NotFound => f.write_str("NotFound"),
            Answer::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A backend that can answer queries
#[async_trait]
pub trait Translator: Send + Sync {
    /// Issue one request for `query`
    ///
    /// Errors surface before anything has been printed.
    async fn lookup(&self, query: &Query) -> Result<Answer>;
}

/// Build the translator selected by `config.mode`
pub fn translator_for(config: &Config) -> Result<Box<dyn Translator>> {
    let translator: Box<dyn Translator> = match config.mode {
        Mode::Stream => Box::new(ChatTranslator::new(config)?),
        Mode::Dict => Box::new(DictTranslator::new(config, DictStyle::Block)?),
        Mode::Lines => Box::new(DictTranslator::new(config, DictStyle::Lines)?),
    };
    Ok(translator)
}
