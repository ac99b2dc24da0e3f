//! Keyword-based confusion scoring over answer comments.
//!
//! A crude signal: comments that complain about an answer ("doesn't
//! work", "wrong", "fails", ...) suggest the answer is less trustworthy
//! than its vote count implies. The score feeds the deterministic badge
//! classifier as a penalty term.

/// Phrases that indicate readers are confused by or disputing an answer.
const CONFUSION_KEYWORDS: [&str; 9] = [
    "doesn't work",
    "not working",
    "still broken",
    "can you explain",
    "does this work",
    "not correct",
    "wrong",
    "error",
    "fails",
];

/// Count confusion keyword hits across a set of comments.
///
/// Each comment is lowercased and checked against every keyword; a single
/// comment contributes one point per keyword it contains. There is no
/// normalization by comment count or length.
pub fn confusion_score<S: AsRef<str>>(comments: &[S]) -> u32 {
    let mut score = 0;
    for comment in comments {
        let lower = comment.as_ref().to_lowercase();
        for keyword in CONFUSION_KEYWORDS {
            if lower.contains(keyword) {
                score += 1;
            }
        }
    }
    score
}
