//! Intent handling: the host-facing entry point.
//!
//! One call per user action. The orchestrator never fails: every error on
//! the way — LLM down, search empty, verdict unparseable — degrades into
//! a structured response, at worst a plain explanation with no sources.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::badge::{backfill_reasons, reclassify};
use crate::llm::{ChatMessage, CompletionRequest, LlmClient};
use crate::model::{Intent, Mode, Question};
use crate::prompt::{self, PromptVoice};
use crate::query::build_search_query;
use crate::retrieval::{truncate_chars, RetrievalPipeline};
use crate::review::{merge_verdict, request_review};

/// Placeholder text substituted when an explanation call fails.
const LLM_FAILURE_TEXT: &str = "AI request failed.";

/// Canned refusal for the one unsupported intent/mode combination.
const IMPROVE_DISABLED_TEXT: &str = "Code improvement is disabled when Stack Search is enabled.";

/// Chars of raw content used as the search query when query building fails.
const RAW_QUERY_CHARS: usize = 200;

/// Sampling settings for explanation completions.
const EXPLANATION_TEMPERATURE: f64 = 0.3;
const EXPLANATION_MAX_TOKENS: u32 = 300;

/// What the host asks for: an intent over raw selected text, in AI-only
/// or source-backed mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRequest {
    pub intent: Intent,
    #[serde(rename = "rawContent")]
    pub raw_content: String,
    pub mode: Mode,
}

/// What the host gets back. Always produced; never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResponse {
    pub intent: Intent,
    /// The AI explanation (or a placeholder if the LLM call failed)
    pub text: String,
    /// Review summary, present only when a source review ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Curated sources with classified answers; empty in AI mode or when
    /// retrieval found nothing
    pub sources: Vec<Question>,
}

impl IntentResponse {
    fn plain(intent: Intent, text: impl Into<String>) -> Self {
        Self {
            intent,
            text: text.into(),
            summary: None,
            sources: Vec::new(),
        }
    }
}

/// Coordinates the LLM and retrieval pipeline for one request at a time.
pub struct Orchestrator {
    llm: Arc<dyn LlmClient>,
    retrieval: RetrievalPipeline,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, retrieval: RetrievalPipeline) -> Self {
        Self { llm, retrieval }
    }

    /// Handle one intent. Infallible by design: all failure modes degrade
    /// into a structured response.
    pub async fn handle(&self, request: IntentRequest) -> IntentResponse {
        let IntentRequest {
            intent,
            raw_content,
            mode,
        } = request;

        if mode == Mode::Stack && intent == Intent::Improve {
            return IntentResponse::plain(intent, IMPROVE_DISABLED_TEXT);
        }

        let explanation = self.explain(intent, &raw_content).await;

        if mode != Mode::Stack {
            return IntentResponse::plain(intent, explanation);
        }

        let query = match build_search_query(self.llm.as_ref(), &raw_content).await {
            Ok(query) if !query.is_empty() => query,
            Ok(_) | Err(_) => {
                warn!("query build failed, searching with raw content");
                truncate_chars(&raw_content, RAW_QUERY_CHARS)
            }
        };

        let questions = match self.retrieval.retrieve(&query, &raw_content).await {
            Ok(questions) => questions,
            Err(e) => {
                debug!(error = %e, "no sources, answering without them");
                return IntentResponse::plain(intent, explanation);
            }
        };

        let verdict = request_review(self.llm.as_ref(), &questions, &raw_content).await;
        let sources: Vec<Question> = merge_verdict(questions, &verdict)
            .into_iter()
            .map(reclassify)
            .map(backfill_reasons)
            .collect();

        let summary = if verdict.summary.is_empty() {
            None
        } else {
            Some(verdict.summary)
        };

        IntentResponse {
            intent,
            text: explanation,
            summary,
            sources,
        }
    }

    /// Plain explanation for the user's content; a failed call substitutes
    /// placeholder text rather than propagating.
    async fn explain(&self, intent: Intent, content: &str) -> String {
        let request = CompletionRequest::new()
            .with_message(ChatMessage::user(prompt::explanation_prompt(
                intent,
                content,
                PromptVoice::Assistant,
            )))
            .with_temperature(EXPLANATION_TEMPERATURE)
            .with_max_tokens(EXPLANATION_MAX_TOKENS);

        match self.llm.complete(request).await {
            Ok(response) => response.text,
            Err(e) => {
                warn!(error = %e, "explanation call failed");
                LLM_FAILURE_TEXT.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::llm::{CompletionResponse, TokenUsage};
    use crate::model::Badge;
    use crate::search::{SearchAnswer, SearchClient, SearchComment, SearchQuestion};
    use async_trait::async_trait;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    /// Routes completions by inspecting the prompt text.
    struct RoutedLlm {
        explanation: Result<String>,
        query: String,
        review: String,
    }

    impl RoutedLlm {
        fn healthy(review: &str) -> Self {
            Self {
                explanation: Ok("the explanation".to_string()),
                query: "generated query".to_string(),
                review: review.to_string(),
            }
        }
    }

    #[async_trait]
    impl LlmClient for RoutedLlm {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
            let prompt = &request.messages[0].content;
            let text = if prompt.contains("expert technical reviewer") {
                self.review.clone()
            } else if prompt.contains("concise Stack Overflow search query") {
                self.query.clone()
            } else {
                match &self.explanation {
                    Ok(text) => text.clone(),
                    Err(_) => return Err(Error::Llm("down".to_string())),
                }
            };

            Ok(CompletionResponse {
                text,
                model: "test".to_string(),
                usage: TokenUsage::default(),
                created_at: Utc::now(),
            })
        }

        fn provider(&self) -> &str {
            "test"
        }
    }

    /// One question, one accepted answer with six votes.
    struct OneHitSearch;

    #[async_trait]
    impl SearchClient for OneHitSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchQuestion>> {
            Ok(vec![SearchQuestion {
                question_id: 1,
                title: "Why is x undefined?".to_string(),
                link: "https://stackoverflow.com/q/1".to_string(),
            }])
        }

        async fn fetch_answers(&self, _question_id: u64) -> Result<Vec<SearchAnswer>> {
            Ok(vec![SearchAnswer {
                answer_id: 10,
                body: "<p>Declare it first</p>".to_string(),
                score: 6,
                is_accepted: true,
            }])
        }

        async fn fetch_comments(&self, _answer_id: u64) -> Result<Vec<SearchComment>> {
            Ok(Vec::new())
        }
    }

    /// Always empty.
    struct EmptySearch;

    #[async_trait]
    impl SearchClient for EmptySearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchQuestion>> {
            Ok(Vec::new())
        }

        async fn fetch_answers(&self, _question_id: u64) -> Result<Vec<SearchAnswer>> {
            Ok(Vec::new())
        }

        async fn fetch_comments(&self, _answer_id: u64) -> Result<Vec<SearchComment>> {
            Ok(Vec::new())
        }
    }

    fn orchestrator(llm: RoutedLlm, search: Arc<dyn SearchClient>) -> Orchestrator {
        Orchestrator::new(Arc::new(llm), RetrievalPipeline::new(search))
    }

    #[tokio::test]
    async fn test_ai_mode_returns_plain_explanation() {
        let orch = orchestrator(RoutedLlm::healthy("{}"), Arc::new(EmptySearch));
        let response = orch
            .handle(IntentRequest {
                intent: Intent::Explain,
                raw_content: "let x;".to_string(),
                mode: Mode::Ai,
            })
            .await;

        assert_eq!(response.text, "the explanation");
        assert_eq!(response.summary, None);
        assert!(response.sources.is_empty());
    }

    #[tokio::test]
    async fn test_stack_improve_is_refused() {
        let orch = orchestrator(RoutedLlm::healthy("{}"), Arc::new(OneHitSearch));
        let response = orch
            .handle(IntentRequest {
                intent: Intent::Improve,
                raw_content: "code".to_string(),
                mode: Mode::Stack,
            })
            .await;

        assert_eq!(
            response.text,
            "Code improvement is disabled when Stack Search is enabled."
        );
        assert!(response.sources.is_empty());
    }

    #[tokio::test]
    async fn test_llm_failure_substitutes_placeholder() {
        let llm = RoutedLlm {
            explanation: Err(Error::Llm("down".to_string())),
            query: String::new(),
            review: String::new(),
        };
        let orch = orchestrator(llm, Arc::new(EmptySearch));
        let response = orch
            .handle(IntentRequest {
                intent: Intent::Debug,
                raw_content: "boom".to_string(),
                mode: Mode::Ai,
            })
            .await;

        assert_eq!(response.text, "AI request failed.");
    }

    #[tokio::test]
    async fn test_stack_mode_no_sources_degrades_to_plain() {
        let orch = orchestrator(RoutedLlm::healthy("{}"), Arc::new(EmptySearch));
        let response = orch
            .handle(IntentRequest {
                intent: Intent::Debug,
                raw_content: "TypeError: x is not a function".to_string(),
                mode: Mode::Stack,
            })
            .await;

        assert_eq!(response.text, "the explanation");
        assert_eq!(response.summary, None);
        assert!(response.sources.is_empty());
    }

    #[tokio::test]
    async fn test_stack_mode_full_pipeline() {
        let review = r#"{
            "summary": "solid accepted answer",
            "answers": [
                {"questionTitle": "Why is x undefined?", "answerIndex": 0, "badge": "SILVER", "reason": "fine"}
            ]
        }"#;
        let orch = orchestrator(RoutedLlm::healthy(review), Arc::new(OneHitSearch));
        let response = orch
            .handle(IntentRequest {
                intent: Intent::Debug,
                raw_content: "x is undefined".to_string(),
                mode: Mode::Stack,
            })
            .await;

        assert_eq!(response.text, "the explanation");
        assert_eq!(response.summary.as_deref(), Some("solid accepted answer"));
        assert_eq!(response.sources.len(), 1);

        let answer = &response.sources[0].answers[0];
        assert_eq!(answer.body, "Declare it first");
        // Deterministic classifier overrides the LLM's SILVER: accepted
        // with 6 votes is GOLD, and the non-"Accepted" reason was dropped
        // and regenerated.
        assert_eq!(answer.badge, Some(Badge::Gold));
        assert_eq!(answer.confidence, Some(92));
        assert_eq!(
            answer.badge_reason.as_deref(),
            Some(
                "Accepted by the question author. Community score: 6 upvotes. \
                 AI confidence score: 92%"
            )
        );
    }

    #[tokio::test]
    async fn test_unparseable_review_still_classifies() {
        let orch = orchestrator(
            RoutedLlm::healthy("Sure, here's my review!"),
            Arc::new(OneHitSearch),
        );
        let response = orch
            .handle(IntentRequest {
                intent: Intent::Explain,
                raw_content: "x".to_string(),
                mode: Mode::Stack,
            })
            .await;

        assert_eq!(response.summary, None);
        let answer = &response.sources[0].answers[0];
        assert_eq!(answer.badge, Some(Badge::Gold));
        assert!(answer.badge_reason.is_some());
    }

    #[tokio::test]
    async fn test_response_serializes_with_camel_case_fields() {
        let orch = orchestrator(RoutedLlm::healthy("{}"), Arc::new(EmptySearch));
        let response = orch
            .handle(IntentRequest {
                intent: Intent::Explain,
                raw_content: "x".to_string(),
                mode: Mode::Ai,
            })
            .await;

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["intent"], "EXPLAIN");
        assert!(json.get("summary").is_none());
    }
}
