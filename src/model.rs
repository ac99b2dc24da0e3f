//! Core data model: questions, answers, and trust badges.
//!
//! All records are built fresh for one intent-handling call and discarded
//! with the response; nothing here persists.

use serde::{Deserialize, Serialize};

/// What the user asked the assistant to do with the selected text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Intent {
    Explain,
    Debug,
    Improve,
    Unknown,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explain => write!(f, "EXPLAIN"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Improve => write!(f, "IMPROVE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Whether the response is AI-only or backed by retrieved sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Ai,
    Stack,
}

/// Trust classification for a retrieved answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Badge {
    Gold,
    Silver,
    Bronze,
    Warning,
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gold => write!(f, "GOLD"),
            Self::Silver => write!(f, "SILVER"),
            Self::Bronze => write!(f, "BRONZE"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// A retrieved answer, enriched during the pipeline.
///
/// `confidence`, `badge`, and `badge_reason` start out absent and are
/// guaranteed populated once classification and reason backfill have run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Sanitized answer body (markdown-ish plain text)
    pub body: String,
    /// Vote score; may be negative
    pub votes: i32,
    /// Whether the question author accepted this answer
    pub accepted: bool,
    /// Sanitized comments, deduplicated by exact text
    pub comments: Vec<String>,
    /// Confusion keyword hits across the comments
    pub confusion: u32,
    /// Derived 0-100 trust value, set by the classifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// Trust badge, set by the classifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    /// Human-readable justification for the badge
    #[serde(skip_serializing_if = "Option::is_none", rename = "badgeReason")]
    pub badge_reason: Option<String>,
}

impl Answer {
    pub fn new(body: impl Into<String>, votes: i32, accepted: bool) -> Self {
        Self {
            body: body.into(),
            votes,
            accepted,
            comments: Vec::new(),
            confusion: 0,
            confidence: None,
            badge: None,
            badge_reason: None,
        }
    }

    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_confusion(mut self, confusion: u32) -> Self {
        self.confusion = confusion;
        self
    }
}

/// A retrieved question with its enriched answers. Identity is the link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    pub link: String,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn new(title: impl Into<String>, link: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            answers,
        }
    }
}
