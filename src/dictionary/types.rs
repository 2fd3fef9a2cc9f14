//! Dictionary response payload
//!
//! Only the fields that are read are modelled; everything else in the
//! payload is ignored.

use serde::Deserialize;

/// Top-level dictionary response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictResponse {
    pub basic: Option<BasicEntry>,
}

/// Basic dictionary entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicEntry {
    pub explains: Option<Vec<String>>,
}

impl DictResponse {
    /// Take the definitions out of the response, `None` when either level
    /// is missing
    pub fn into_explains(self) -> Option<Vec<String>> {
        self.basic?.explains
    }
}
