//! Command-line argument parsing for dictbuddy
//! 
//! Provides a clap-based CLI: free-form words to look up plus a handful of
//! switches selecting the backend and its knobs.

use clap::{Parser, ValueEnum};
use std::ffi::OsString;

use crate::lookup::Query;

/// Long options also accepted with a single dash, as in `-prompt "..."`
const SINGLE_DASH_LONGS: &[&str] = &["prompt", "mode", "verbose"];

/// dictbuddy - look up English and Chinese words from the terminal
#[derive(Parser, Debug)]
#[command(name = "dictbuddy")]
#[command(version)]
#[command(about = "Look up English and Chinese words from the terminal", long_about = None)]
pub struct Args {
    /// Word or phrase to look up; starts an interactive prompt when omitted
    #[arg(value_name = "WORDS")]
    pub words: Vec<String>,

    /// Lookup backend
    #[arg(short, long, value_enum, default_value_t = Mode::Stream)]
    pub mode: Mode,

    /// Custom prompt template for stream mode (`%s` is replaced by the query)
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Print raw request URLs and response bodies, and enable debug logs
    #[arg(short, long)]
    pub verbose: bool,
}

/// Backend variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Streaming chat-completion translation
    Stream,
    /// Dictionary lookup printed as one block, "not found" when empty
    Dict,
    /// Dictionary lookup printed one line per entry, silent when empty
    Lines,
}

impl Args {
    /// Parse the process arguments, accepting single-dash long options
    pub fn from_env() -> Self {
        Self::parse_from(normalize_long_flags(std::env::args_os()))
    }

    /// Parse `args` the way [`Args::from_env`] does, returning clap's error
    pub fn try_from_iter<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_long_flags(args))
    }

    /// Words joined by single spaces
    pub fn joined_words(&self) -> String {
        self.words.join(" ")
    }

    /// Query for single-shot mode, `None` means interactive mode
    pub fn single_shot_query(&self) -> Option<Query> {
        Query::new(&self.joined_words())
    }
}

impl Mode {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Stream => "stream",
            Mode::Dict => "dict",
            Mode::Lines => "lines",
        }
    }

    /// Whether this mode talks to the chat-completion API
    pub fn needs_api_key(&self) -> bool {
        matches!(self, Mode::Stream)
    }
}

/// Rewrite `-prompt`, `-prompt=...` and friends to their `--` form
///
/// clap would otherwise read `-prompt` as `-p rompt`. Nothing after a bare
/// `--` is touched.
fn normalize_long_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut positional_only = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if positional_only {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                positional_only = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                    if SINGLE_DASH_LONGS.contains(&name) {
                        OsString::from(format!("-{}", text))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}
