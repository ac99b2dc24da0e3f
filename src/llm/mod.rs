//! LLM completion client abstraction.
//!
//! A narrow contract over one provider (Groq's OpenAI-compatible chat
//! completions endpoint). Callers hold a `dyn LlmClient` so tests and
//! alternative providers can slot in behind the same trait.
//!
//! ## Example
//!
//! ```rust,ignore
//! use stacksense_core::llm::{ChatMessage, ClientConfig, CompletionRequest, GroqClient, LlmClient};
//!
//! let client = GroqClient::new(
//!     ClientConfig::new("your-api-key").with_default_model("llama-3.1-8b-instant"),
//! )?;
//!
//! let request = CompletionRequest::new()
//!     .with_message(ChatMessage::user("Explain borrow checking"))
//!     .with_temperature(0.3)
//!     .with_max_tokens(300);
//!
//! let response = client.complete(request).await?;
//! ```

mod client;
mod types;

pub use client::{ClientConfig, GroqClient, LlmClient};
pub use types::{ChatMessage, ChatRole, CompletionRequest, CompletionResponse, TokenUsage};
