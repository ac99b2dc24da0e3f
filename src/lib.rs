//! # stacksense-core
//!
//! Library core of a "trusted answers" assistant: it augments a user's
//! selected text with an AI explanation and curated Stack Overflow
//! answers, each carrying a deterministic trust badge
//! (GOLD / SILVER / BRONZE / WARNING).
//!
//! ## Core Components
//!
//! - **Retrieval**: search, fetch, sanitize, and confusion-score sources
//! - **Review**: LLM verdict over the sources, merged best-effort
//! - **Badge**: deterministic confidence scoring and badge assignment
//! - **Orchestrator**: the host-facing, never-failing entry point
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stacksense_core::{
//!     ClientConfig, GroqClient, Intent, IntentRequest, Mode, Orchestrator,
//!     RetrievalPipeline, SearchConfig, StackExchangeClient,
//! };
//!
//! let llm = Arc::new(GroqClient::new(ClientConfig::new("api-key"))?);
//! let search = Arc::new(StackExchangeClient::new(SearchConfig::default())?);
//! let orchestrator = Orchestrator::new(llm, RetrievalPipeline::new(search));
//!
//! let response = orchestrator
//!     .handle(IntentRequest {
//!         intent: Intent::Debug,
//!         raw_content: "TypeError: x is not a function".to_string(),
//!         mode: Mode::Stack,
//!     })
//!     .await;
//!
//! for question in &response.sources {
//!     println!("{} ({})", question.title, question.link);
//! }
//! ```

pub mod badge;
pub mod confusion;
pub mod error;
pub mod llm;
pub mod model;
pub mod orchestrator;
pub mod prompt;
pub mod query;
pub mod retrieval;
pub mod review;
pub mod sanitize;
pub mod search;

// Re-exports for convenience
pub use badge::{backfill_reasons, classify, reclassify, Classification};
pub use confusion::confusion_score;
pub use error::{Error, Result};
pub use llm::{
    ChatMessage, ChatRole, ClientConfig, CompletionRequest, CompletionResponse, GroqClient,
    LlmClient, TokenUsage,
};
pub use model::{Answer, Badge, Intent, Mode, Question};
pub use orchestrator::{IntentRequest, IntentResponse, Orchestrator};
pub use query::build_search_query;
pub use retrieval::RetrievalPipeline;
pub use review::{merge_verdict, parse_verdict, request_review, ReviewVerdict, VerdictEntry};
pub use sanitize::{clean_answer_body, clean_comment};
pub use search::{
    SearchAnswer, SearchClient, SearchComment, SearchConfig, SearchQuestion, StackExchangeClient,
};
