//! Configuration management for dictbuddy
//!
//! Built once at startup from the parsed arguments and the environment, then
//! handed to the translator. Nothing is read from or written to disk.

use crate::cli::args::{Args, Mode};
use crate::errors::{LookupError, Result};
use crate::streaming::prompt::DEFAULT_PROMPT;

/// Environment variable holding the chat-completion credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the chat-completion base URL
pub const API_BASE_ENV: &str = "OPENAI_BASE_URL";

/// Default chat-completion base URL
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Chat model used for every request
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Output size cap for every chat request
pub const DEFAULT_MAX_TOKENS: u32 = 3000;

/// Dictionary endpoint
pub const DEFAULT_DICT_ENDPOINT: &str = "http://fanyi.youdao.com/openapi.do";

/// Static dictionary API key pair
pub const DEFAULT_DICT_KEYFROM: &str = "YouDaoCV";
pub const DEFAULT_DICT_KEY: &str = "659600698";

/// Complete configuration for a dictbuddy process
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub prompt: Option<String>,
    pub verbose: bool,
    pub dict_endpoint: String,
    pub dict_keyfrom: String,
    pub dict_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Stream,
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            prompt: None,
            verbose: false,
            dict_endpoint: DEFAULT_DICT_ENDPOINT.to_string(),
            dict_keyfrom: DEFAULT_DICT_KEYFROM.to_string(),
            dict_key: DEFAULT_DICT_KEY.to_string(),
        }
    }
}

impl Config {
    /// Build configuration from arguments and the process environment
    pub fn from_args(args: &Args) -> Result<Self> {
        Self::from_source(args, |name| std::env::var(name).ok())
    }

    /// Build configuration from arguments and an environment lookup
    ///
    /// Empty variables count as unset. Fails when the selected mode needs a
    /// credential that is not there.
    pub fn from_source<F>(args: &Args, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        let mut config = Config {
            mode: args.mode,
            api_key: non_empty(API_KEY_ENV),
            prompt: args.prompt.clone().filter(|p| !p.is_empty()),
            verbose: args.verbose,
            ..Config::default()
        };

        if let Some(base) = non_empty(API_BASE_ENV) {
            config.api_base = base.trim_end_matches('/').to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.mode.needs_api_key() && self.api_key.is_none() {
            return Err(LookupError::ConfigError(format!("{} not set", API_KEY_ENV)));
        }

        Ok(())
    }

    /// Prompt template in effect, the custom one wins
    pub fn prompt_template(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 3000);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.prompt_template(), DEFAULT_PROMPT);
    }

    #[test]
    fn test_stream_mode_requires_key() {
        let args = Args::parse_from(["dictbuddy", "hello"]);
        let err = Config::from_source(&args, env_of(&[])).unwrap_err();
        assert!(matches!(err, LookupError::ConfigError(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let args = Args::parse_from(["dictbuddy"]);
        let result = Config::from_source(&args, env_of(&[(API_KEY_ENV, "")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_dict_modes_do_not_need_key() {
        for mode in ["dict", "lines"] {
            let args = Args::parse_from(["dictbuddy", "-m", mode]);
            let config = Config::from_source(&args, env_of(&[])).unwrap();
            assert!(config.api_key.is_none());
        }
    }

    #[test]
    fn test_key_and_base_from_env() {
        let args = Args::parse_from(["dictbuddy", "-v"]);
        let config = Config::from_source(
            &args,
            env_of(&[(API_KEY_ENV, "sk-test"), (API_BASE_ENV, "http://localhost:8080/v1/")]),
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.api_base, "http://localhost:8080/v1");
        assert!(config.verbose);
    }

    #[test]
    fn test_custom_prompt_takes_precedence() {
        let args = Args::parse_from(["dictbuddy", "--prompt", "Explain %s"]);
        let config = Config::from_source(&args, env_of(&[(API_KEY_ENV, "sk-test")])).unwrap();
        assert_eq!(config.prompt_template(), "Explain %s");
    }
}
