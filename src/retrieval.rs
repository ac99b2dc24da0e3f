//! Retrieval pipeline: search, fetch, sanitize, and score sources.
//!
//! One retrieval cycle turns a search query into at most two enriched
//! questions, each carrying at most its two top-voted answers with
//! sanitized bodies, deduplicated comments, and a confusion score. A
//! failing search or fetch degrades to an empty result or a skipped
//! record; the only hard signal out of here is `Error::NoSources`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::confusion::confusion_score;
use crate::error::{Error, Result};
use crate::model::{Answer, Question};
use crate::sanitize::{clean_answer_body, clean_comment};
use crate::search::{SearchAnswer, SearchClient, SearchQuestion};

/// Top answers fetched per question; also bounds per-question concurrency.
const MAX_ANSWERS_PER_QUESTION: usize = 2;

/// Enriched questions retained for downstream review. Caps LLM prompt size.
const MAX_RETAINED_QUESTIONS: usize = 2;

/// Sanitized comments shorter than this are dropped.
const MIN_COMMENT_CHARS: usize = 8;

/// Fallback searches use at most this many chars of the raw content.
const FALLBACK_QUERY_CHARS: usize = 200;

/// Default ceiling on any single outbound search API call.
const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

/// Fetches and enriches candidate questions for a user query.
pub struct RetrievalPipeline {
    search: Arc<dyn SearchClient>,
    call_timeout: Duration,
}

impl RetrievalPipeline {
    pub fn new(search: Arc<dyn SearchClient>) -> Self {
        Self {
            search,
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
        }
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Retrieve enriched questions for `primary_query`, falling back once
    /// to a truncated slice of `raw_content` if the primary search comes
    /// back empty. Returns `Error::NoSources` when nothing survives.
    pub async fn retrieve(&self, primary_query: &str, raw_content: &str) -> Result<Vec<Question>> {
        let mut candidates = self.search_recovered(primary_query).await;

        if candidates.is_empty() {
            let fallback = truncate_chars(raw_content, FALLBACK_QUERY_CHARS);
            warn!(query = %primary_query, "primary search empty, falling back to raw content");
            candidates = self.search_recovered(&fallback).await;
        }

        let mut questions = Vec::new();
        for candidate in candidates {
            if questions.len() >= MAX_RETAINED_QUESTIONS {
                break;
            }
            if let Some(question) = self.enrich_question(&candidate).await {
                questions.push(question);
            }
        }

        if questions.is_empty() {
            return Err(Error::NoSources);
        }

        debug!(count = questions.len(), "retrieval complete");
        Ok(questions)
    }

    /// Search, recovering any failure into an empty candidate list.
    async fn search_recovered(&self, query: &str) -> Vec<SearchQuestion> {
        match self.bounded(self.search.search(query)).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "search failed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Fetch and enrich a question's top answers. Returns `None` when the
    /// answer fetch fails or yields nothing usable.
    async fn enrich_question(&self, candidate: &SearchQuestion) -> Option<Question> {
        let answers = match self.bounded(self.search.fetch_answers(candidate.question_id)).await {
            Ok(answers) => answers,
            Err(e) => {
                warn!(question_id = candidate.question_id, error = %e, "answer fetch failed, skipping question");
                return None;
            }
        };

        // Top answers enrich concurrently; the per-question cap bounds the
        // fan-out.
        let enriched = join_all(
            answers
                .iter()
                .take(MAX_ANSWERS_PER_QUESTION)
                .map(|answer| self.enrich_answer(answer)),
        )
        .await;

        if enriched.is_empty() {
            return None;
        }

        Some(Question::new(
            candidate.title.clone(),
            candidate.link.clone(),
            enriched,
        ))
    }

    async fn enrich_answer(&self, answer: &SearchAnswer) -> Answer {
        let comments = match self.bounded(self.search.fetch_comments(answer.answer_id)).await {
            Ok(comments) => comments,
            Err(e) => {
                warn!(answer_id = answer.answer_id, error = %e, "comment fetch failed, treating as none");
                Vec::new()
            }
        };

        let mut clean_comments: Vec<String> = Vec::new();
        for comment in &comments {
            let text = clean_comment(&comment.body);
            if text.chars().count() < MIN_COMMENT_CHARS {
                continue;
            }
            // Exact-text dedup within an answer, order preserved.
            if !clean_comments.contains(&text) {
                clean_comments.push(text);
            }
        }

        let confusion = confusion_score(&clean_comments);

        Answer::new(clean_answer_body(&answer.body), answer.score, answer.is_accepted)
            .with_comments(clean_comments)
            .with_confusion(confusion)
    }

    /// Bound an outbound call with the pipeline's timeout, on top of the
    /// client's own HTTP timeout.
    async fn bounded<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.call_timeout, fut)
            .await
            .map_err(|_| Error::timeout(self.call_timeout.as_millis() as u64))?
    }
}

/// Char-boundary-safe prefix of `text`.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
