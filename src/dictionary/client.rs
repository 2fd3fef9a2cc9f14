//! Dictionary REST client
//!
//! Builds the fixed query URL, fetches the whole body and reads
//! `basic.explains` out of it. How an answer is presented depends on the
//! [`DictStyle`].

use async_trait::async_trait;
use colored::Colorize;
use reqwest::Client;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::cli::Config;
use crate::dictionary::types::DictResponse;
use crate::errors::{LookupError, Result};
use crate::lookup::{Answer, Query, Translator};

/// Text shown in block style when the dictionary has no entry
pub const NOT_FOUND: &str = "not found";

/// Presentation of dictionary results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictStyle {
    /// One newline-joined block, "not found" when empty
    Block,
    /// One line per definition, nothing when empty
    Lines,
}

impl DictStyle {
    /// Turn the looked-up definitions into an answer
    pub fn present(&self, explains: Option<Vec<String>>) -> Answer {
        match (self, explains) {
            (DictStyle::Block, Some(explains)) => {
                Answer::Text(explains.join("\n").trim_end().to_string())
            }
            (DictStyle::Block, None) => Answer::Text(NOT_FOUND.to_string()),
            (DictStyle::Lines, Some(explains)) => Answer::Lines(explains),
            (DictStyle::Lines, None) => Answer::NotFound,
        }
    }
}

/// Where the raw request URL and response body go in verbose mode
pub type VerboseSink = Arc<Mutex<dyn Write + Send>>;

/// Dictionary translator
#[derive(Clone)]
pub struct DictTranslator {
    client: Client,
    endpoint: String,
    keyfrom: String,
    key: String,
    style: DictStyle,
    verbose: Option<VerboseSink>,
}

impl DictTranslator {
    /// Create translator from configuration
    pub fn new(config: &Config, style: DictStyle) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(LookupError::HttpError)?;

        Ok(Self {
            client,
            endpoint: config.dict_endpoint.clone(),
            keyfrom: config.dict_keyfrom.clone(),
            key: config.dict_key.clone(),
            style,
            verbose: config.verbose.then(|| Arc::new(Mutex::new(io::stderr())) as VerboseSink),
        })
    }

    /// Send verbose output to `sink` instead of stderr
    ///
    /// Has no effect unless verbose output was enabled in the configuration.
    pub fn with_verbose_writer(mut self, sink: VerboseSink) -> Self {
        if self.verbose.is_some() {
            self.verbose = Some(sink);
        }
        self
    }

    /// Full request URL for `query`
    pub fn query_url(&self, query: &Query) -> String {
        format!(
            "{}?keyfrom={}&key={}&type=data&doctype=json&version=1.1&q={}",
            self.endpoint,
            self.keyfrom,
            self.key,
            urlencoding::encode(query.as_str())
        )
    }

    /// Fetch and decode the dictionary entry for `query`
    pub async fn fetch(&self, query: &Query) -> Result<DictResponse> {
        let url = self.query_url(query);
        self.echo("url:", &url)?;

        let response = self.client.get(&url).send().await?;
        debug!(status = %response.status(), "dictionary response received");

        let body = response.text().await?;
        self.echo("body:", &body)?;

        Ok(serde_json::from_str(&body)?)
    }

    fn echo(&self, label: &str, text: &str) -> Result<()> {
        if let Some(sink) = &self.verbose {
            let mut out = sink.lock().map_err(|_| {
                LookupError::IoError(io::Error::new(
                    io::ErrorKind::Other,
                    "verbose writer poisoned",
                ))
            })?;
            writeln!(out, "{} {}", label.dimmed(), text)?;
        }
        Ok(())
    }
}

#[async_trait]
impl Translator for DictTranslator {
    async fn lookup(&self, query: &Query) -> Result<Answer> {
        let response = self.fetch(query).await?;
        let explains = response.into_explains();
        debug!(query = %query, entries = ?explains.as_ref().map(Vec::len), "dictionary lookup done");
        Ok(self.style.present(explains))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator(style: DictStyle) -> DictTranslator {
        DictTranslator::new(&Config::default(), style).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_query_url_encoding() {
        let query = Query::new("  good morning & 你好 ").unwrap();
        let url = translator(DictStyle::Block).query_url(&query);
        assert!(url.starts_with("http://fanyi.youdao.com/openapi.do?keyfrom="));
        assert!(url.contains("&type=data&doctype=json&version=1.1"));
        assert!(url.ends_with("&q=good%20morning%20%26%20%E4%BD%A0%E5%A5%BD"));
    }

    #[test]
    fn test_block_joins_definitions() {
        match DictStyle::Block.present(Some(strings(&["a", "b"]))) {
            Answer::Text(text) => assert_eq!(text, "a\nb"),
            other => panic!("unexpected answer: {:?}", other),
        }
    }

    #[test]
    fn test_block_trims_trailing_whitespace() {
        match DictStyle::Block.present(Some(strings(&["a ", "b \n"]))) {
            Answer::Text(text) => assert_eq!(text, "a \nb"),
            other => panic!("unexpected answer: {:?}", other),
        }
    }

    #[test]
    fn test_block_not_found() {
        match DictStyle::Block.present(None) {
            Answer::Text(text) => assert_eq!(text, NOT_FOUND),
            other => panic!("unexpected answer: {:?}", other),
        }
    }

    #[test]
    fn test_lines_keep_order() {
        match DictStyle::Lines.present(Some(strings(&["first", "second"]))) {
            Answer::Lines(lines) => assert_eq!(lines, strings(&["first", "second"])),
            other => panic!("unexpected answer: {:?}", other),
        }
    }

    #[test]
    fn test_lines_not_found_is_silent() {
        assert!(matches!(DictStyle::Lines.present(None), Answer::NotFound));
    }

    #[test]
    fn test_style_from_constructor() {
        assert_eq!(translator(DictStyle::Lines).style, DictStyle::Lines);
    }

    #[test]
    fn test_verbose_sink_follows_config() {
        assert!(translator(DictStyle::Block).verbose.is_none());

        let config = Config {
            verbose: true,
            ..Config::default()
        };
        let translator = DictTranslator::new(&config, DictStyle::Block).unwrap();
        assert!(translator.verbose.is_some());
    }
}
