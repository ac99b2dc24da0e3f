//! Stack Exchange API wire types.

use serde::Deserialize;

/// Envelope wrapping every Stack Exchange API response.
#[derive(Debug, Deserialize)]
pub(crate) struct ItemsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// A question returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchQuestion {
    pub question_id: u64,
    pub title: String,
    pub link: String,
}

/// An answer returned by the answers endpoint, sorted by votes descending.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchAnswer {
    pub answer_id: u64,
    /// Raw HTML body
    #[serde(default)]
    pub body: String,
    /// Vote score; may be negative
    pub score: i32,
    pub is_accepted: bool,
}

/// A comment returned by the comments endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchComment {
    /// Raw HTML body
    #[serde(default)]
    pub body: String,
}
