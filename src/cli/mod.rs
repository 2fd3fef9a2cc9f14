//! CLI module for dictbuddy
//! 
//! Handles command-line argument parsing and the startup configuration.

pub mod config;
pub mod args;

pub use config::Config;
pub use args::{Args, Mode};
