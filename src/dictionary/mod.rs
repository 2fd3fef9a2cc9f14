//! REST dictionary backend
//! 
//! One GET per query against a fixed endpoint; definitions come back under
//! `basic.explains`.

pub mod client;
pub mod types;

pub use client::{DictStyle, DictTranslator, VerboseSink, NOT_FOUND};
pub use types::{BasicEntry, DictResponse};
