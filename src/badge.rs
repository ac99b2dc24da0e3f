//! Deterministic badge classification and reason backfill.
//!
//! The final word on an answer's badge. Whatever the LLM review proposed,
//! this pass recomputes confidence from {accepted, votes, confusion} and
//! overwrites the badge; only a reason starting with "Accepted" survives
//! the pass. That prefix check is a known-fragile heuristic inherited
//! from the original scoring rules and kept as-is.

use crate::model::{Answer, Badge, Question};

/// Result of the deterministic scoring pass for one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Trust value clamped to [0, 100]
    pub confidence: u8,
    pub badge: Badge,
}

/// Compute confidence and badge from acceptance, votes, and confusion.
///
/// Pure and idempotent: re-running on an already-classified answer's
/// inputs yields the same result.
pub fn classify(accepted: bool, votes: i32, confusion: u32) -> Classification {
    let mut confidence: i64 = 50;

    // Accepted answers matter a lot.
    if accepted {
        confidence += 30;
    }

    // Votes matter, but capped.
    if votes > 0 {
        confidence += i64::min(votes as i64 * 2, 30);
    }

    // Confusion penalty: harsh for unaccepted low-vote answers, mild for
    // accepted ones.
    if !accepted && votes < 10 {
        confidence -= confusion as i64 * 8;
    }
    if accepted {
        confidence -= confusion as i64 * 2;
    }

    let confidence = confidence.clamp(0, 100) as u8;

    // Priority order: the acceptance branch short-circuits the
    // confidence thresholds.
    let badge = if accepted && (votes >= 5 || confidence >= 80) {
        Badge::Gold
    } else if confidence >= 60 {
        Badge::Silver
    } else if confidence >= 45 {
        Badge::Bronze
    } else {
        Badge::Warning
    };

    Classification { confidence, badge }
}

/// Re-score every answer of a question, overwriting any merged badge and
/// discarding any reason that does not start with the literal "Accepted".
pub fn reclassify(question: Question) -> Question {
    let Question { title, link, answers } = question;
    let answers = answers
        .into_iter()
        .map(|mut answer| {
            let scored = classify(answer.accepted, answer.votes, answer.confusion);
            answer.confidence = Some(scored.confidence);
            answer.badge = Some(scored.badge);

            // Reset a stale review reason now that the badge was
            // recalculated.
            if answer
                .badge_reason
                .as_deref()
                .is_some_and(|reason| !reason.starts_with("Accepted"))
            {
                answer.badge_reason = None;
            }

            answer
        })
        .collect();

    Question { title, link, answers }
}

/// Fill in a deterministic reason for every answer still lacking one.
pub fn backfill_reasons(question: Question) -> Question {
    let Question { title, link, answers } = question;
    let answers = answers
        .into_iter()
        .map(|mut answer| {
            if answer.badge_reason.is_none() {
                answer.badge_reason = Some(auto_reason(&answer));
            }
            answer
        })
        .collect();

    Question { title, link, answers }
}

/// Compose a human-readable badge justification from the scoring signals.
fn auto_reason(answer: &Answer) -> String {
    let mut reasons = Vec::new();

    if answer.accepted {
        reasons.push("Accepted by the question author".to_string());
    }
    if answer.votes > 5 {
        reasons.push(format!("Community score: {} upvotes", answer.votes));
    }
    if answer.confusion > 0 {
        reasons.push(format!("{} confused comments detected", answer.confusion));
    }

    reasons.push(format!(
        "AI confidence score: {}%",
        answer.confidence.unwrap_or(0)
    ));

    reasons.join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_baseline_is_bronze() {
        // Not accepted, no votes, no confusion: 50 stays in [45, 60).
        let scored = classify(false, 0, 0);
        assert_eq!(scored.confidence, 50);
        assert_eq!(scored.badge, Badge::Bronze);
    }

    #[test]
    fn test_confusion_clamps_to_warning() {
        // 50 - 10*8 clamps to 0.
        let scored = classify(false, 0, 10);
        assert_eq!(scored.confidence, 0);
        assert_eq!(scored.badge, Badge::Warning);
    }

    #[test]
    fn test_accepted_vote_branch_short_circuits_confidence() {
        // 50 + 30 + 10 - 40 = 50, but accepted && votes >= 5 wins.
        let scored = classify(true, 5, 20);
        assert_eq!(scored.confidence, 50);
        assert_eq!(scored.badge, Badge::Gold);
    }

    #[test]
    fn test_vote_bonus_is_capped() {
        // 50 + 30 (cap) = 80.
        let scored = classify(false, 1000, 0);
        assert_eq!(scored.confidence, 80);
        assert_eq!(scored.badge, Badge::Silver);
    }

    #[test]
    fn test_extreme_inputs_stay_clamped() {
        let scored = classify(false, 1000, 1000);
        assert_eq!(scored.confidence, 80);

        let scored = classify(false, 0, 1000);
        assert_eq!(scored.confidence, 0);

        let scored = classify(true, 1000, 1000);
        assert_eq!(scored.confidence, 0);
        assert_eq!(scored.badge, Badge::Gold);
    }

    #[test]
    fn test_negative_votes_get_no_bonus() {
        let scored = classify(false, -3, 0);
        assert_eq!(scored.confidence, 50);
    }

    #[test]
    fn test_accepted_confidence_branch() {
        // Accepted with 1 vote: 50 + 30 + 2 = 82 >= 80 → GOLD.
        let scored = classify(true, 1, 0);
        assert_eq!(scored.confidence, 82);
        assert_eq!(scored.badge, Badge::Gold);
    }

    #[test]
    fn test_accepted_mild_penalty_drops_gold() {
        // 50 + 30 + 2 - 6 = 76: accepted but < 5 votes and < 80.
        let scored = classify(true, 1, 3);
        assert_eq!(scored.confidence, 76);
        assert_eq!(scored.badge, Badge::Silver);
    }

    #[test]
    fn test_reclassify_overrides_review_badge() {
        let mut answer = Answer::new("body", 0, false);
        answer.badge = Some(Badge::Gold);
        answer.badge_reason = Some("Looks right to me".to_string());
        let question = Question::new("t", "l", vec![answer]);

        let question = reclassify(question);
        let answer = &question.answers[0];
        assert_eq!(answer.badge, Some(Badge::Bronze));
        assert_eq!(answer.confidence, Some(50));
        // Non-"Accepted" reason is discarded for regeneration.
        assert_eq!(answer.badge_reason, None);
    }

    #[test]
    fn test_reclassify_keeps_accepted_prefixed_reason() {
        let mut answer = Answer::new("body", 7, true);
        answer.badge_reason = Some("Accepted and widely upvoted".to_string());
        let question = reclassify(Question::new("t", "l", vec![answer]));
        assert_eq!(
            question.answers[0].badge_reason.as_deref(),
            Some("Accepted and widely upvoted")
        );
    }

    #[test]
    fn test_reclassify_is_idempotent() {
        let answer = Answer::new("body", 12, true).with_confusion(2);
        let question = Question::new("t", "l", vec![answer]);

        let once = reclassify(question.clone());
        let twice = reclassify(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_backfill_reason_composition() {
        let mut answer = Answer::new("body", 6, true);
        answer.confidence = Some(90);
        let question = backfill_reasons(Question::new("t", "l", vec![answer]));

        assert_eq!(
            question.answers[0].badge_reason.as_deref(),
            Some(
                "Accepted by the question author. Community score: 6 upvotes. \
                 AI confidence score: 90%"
            )
        );
    }

    #[test]
    fn test_backfill_includes_confusion_count() {
        let mut answer = Answer::new("body", 0, false).with_confusion(3);
        answer.confidence = Some(26);
        let question = backfill_reasons(Question::new("t", "l", vec![answer]));

        assert_eq!(
            question.answers[0].badge_reason.as_deref(),
            Some("3 confused comments detected. AI confidence score: 26%")
        );
    }

    #[test]
    fn test_backfill_always_has_confidence_sentence() {
        let mut answer = Answer::new("body", 0, false);
        answer.confidence = Some(50);
        let question = backfill_reasons(Question::new("t", "l", vec![answer]));
        assert_eq!(
            question.answers[0].badge_reason.as_deref(),
            Some("AI confidence score: 50%")
        );
    }

    #[test]
    fn test_backfill_does_not_touch_existing_reason() {
        let mut answer = Answer::new("body", 0, false);
        answer.badge_reason = Some("Accepted answer".to_string());
        let question = backfill_reasons(Question::new("t", "l", vec![answer]));
        assert_eq!(
            question.answers[0].badge_reason.as_deref(),
            Some("Accepted answer")
        );
    }

    proptest! {
        #[test]
        fn prop_confidence_always_in_range(
            accepted in any::<bool>(),
            votes in -10_000i32..10_000,
            confusion in 0u32..10_000,
        ) {
            let scored = classify(accepted, votes, confusion);
            prop_assert!(scored.confidence <= 100);
        }

        #[test]
        fn prop_classify_is_pure(
            accepted in any::<bool>(),
            votes in -10_000i32..10_000,
            confusion in 0u32..10_000,
        ) {
            prop_assert_eq!(
                classify(accepted, votes, confusion),
                classify(accepted, votes, confusion)
            );
        }
    }
}
