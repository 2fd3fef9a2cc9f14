//! dictbuddy - look up words from the terminal
//! 
//! Sends a word or phrase to a translation backend and prints the answer,
//! either once from the command line or in an interactive prompt loop.
//! 
//! # Backends
//! 
//! - **stream**: chat-completion API, fragments printed as they arrive
//! - **dict**: REST dictionary, definitions printed as one block
//! - **lines**: REST dictionary, one definition per line

pub mod errors;
pub mod cli;
pub mod lookup;
pub mod streaming;
pub mod dictionary;
pub mod repl;
pub mod telemetry;

// Re-export commonly used types
pub use errors::{LookupError, Result};
pub use lookup::{translator_for, Answer, Query, Translator};
