//! Search query generation from free-form user content.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::Result;
use crate::llm::{ChatMessage, CompletionRequest, LlmClient};
use crate::prompt;

static QUERY_NOISE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[\"`\n]").unwrap());

/// Default sampling settings for the short query completion.
const QUERY_TEMPERATURE: f64 = 0.3;
const QUERY_MAX_TOKENS: u32 = 300;

/// Ask the LLM to compress raw content into a short plain-English search
/// query, then strip quotes, backticks, and newlines from the output.
///
/// Errors propagate; the caller falls back to searching with the raw
/// content directly.
pub async fn build_search_query(llm: &dyn LlmClient, raw_content: &str) -> Result<String> {
    let request = CompletionRequest::new()
        .with_message(ChatMessage::user(prompt::search_query_prompt(raw_content)))
        .with_temperature(QUERY_TEMPERATURE)
        .with_max_tokens(QUERY_MAX_TOKENS);

    let response = llm.complete(request).await?;
    Ok(clean_query(&response.text))
}

fn clean_query(text: &str) -> String {
    QUERY_NOISE_RE.replace_all(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_query_strips_noise() {
        assert_eq!(
            clean_query("\"javascript promise `then` not called\"\n"),
            "javascript promise then not called"
        );
    }

    #[test]
    fn test_clean_query_trims() {
        assert_eq!(clean_query("  python list index error  "), "python list index error");
    }
}
