//! LLM review of retrieved sources, and merging its verdict back in.
//!
//! A best-effort annotation layer: the retained questions go to the LLM
//! as serialized JSON inside the review prompt, and the model's per-answer
//! badge/reason verdict is merged back by question title and answer index.
//! Nothing in here can fail a request; a broken call or unparseable reply
//! degrades to an empty verdict and the deterministic classifier still
//! runs downstream.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm::{ChatMessage, CompletionRequest, LlmClient};
use crate::model::{Badge, Question};
use crate::prompt;

/// Sampling settings for the review completion.
const REVIEW_TEMPERATURE: f64 = 0.3;
const REVIEW_MAX_TOKENS: u32 = 300;

/// The LLM's proposed annotations for the retained sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewVerdict {
    /// Short overall summary of the sources
    #[serde(default)]
    pub summary: String,
    /// Per-answer badge proposals
    #[serde(default)]
    pub answers: Vec<VerdictEntry>,
}

impl ReviewVerdict {
    /// The degraded verdict: no summary, no annotations.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One per-answer verdict, addressed by question title and answer index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictEntry {
    pub question_title: String,
    pub answer_index: usize,
    /// Proposed badge. Always overridden by the deterministic classifier;
    /// carried only so the verdict round-trips as documented.
    pub badge: Badge,
    #[serde(default)]
    pub reason: String,
}

/// Ask the LLM to review the retained questions. Any failure — the
/// completion call, or parsing its output — degrades to an empty verdict.
pub async fn request_review(
    llm: &dyn LlmClient,
    questions: &[Question],
    user_question: &str,
) -> ReviewVerdict {
    let stack_json = match serde_json::to_string_pretty(questions) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "failed to serialize sources for review");
            return ReviewVerdict::empty();
        }
    };

    let request = CompletionRequest::new()
        .with_message(ChatMessage::user(prompt::review_prompt(
            &stack_json,
            user_question,
        )))
        .with_temperature(REVIEW_TEMPERATURE)
        .with_max_tokens(REVIEW_MAX_TOKENS);

    let text = match llm.complete(request).await {
        Ok(response) => response.text,
        Err(e) => {
            warn!(error = %e, "review completion failed");
            return ReviewVerdict::empty();
        }
    };

    parse_verdict(&text)
}

/// Parse the LLM's text output as a verdict, degrading to empty on any
/// parse or schema-validation failure.
pub fn parse_verdict(text: &str) -> ReviewVerdict {
    match serde_json::from_str(text) {
        Ok(verdict) => verdict,
        Err(e) => {
            warn!(error = %e, "review output was not valid verdict JSON");
            ReviewVerdict::empty()
        }
    }
}

/// Merge verdict entries into the questions.
///
/// Each entry is located by exact question title (first match — duplicate
/// titles silently collide, a known limitation) and positional answer
/// index; entries that miss either lookup are skipped.
pub fn merge_verdict(mut questions: Vec<Question>, verdict: &ReviewVerdict) -> Vec<Question> {
    for entry in &verdict.answers {
        let Some(question) = questions
            .iter_mut()
            .find(|q| q.title == entry.question_title)
        else {
            continue;
        };

        let Some(answer) = question.answers.get_mut(entry.answer_index) else {
            continue;
        };

        answer.badge = Some(entry.badge);
        answer.badge_reason = if entry.reason.is_empty() {
            None
        } else {
            Some(entry.reason.clone())
        };
    }

    questions
}
