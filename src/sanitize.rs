//! Markup stripping for answer bodies and comments.
//!
//! Stack Exchange returns HTML bodies. The pipeline only needs plain,
//! markdown-ish text: code blocks become fences, inline code becomes
//! backticks, everything else is dropped. Replacement order matters —
//! the fence markers must be rewritten before the generic tag strip
//! removes them.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum length of a sanitized comment, in chars.
const MAX_COMMENT_LEN: usize = 3000;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static CODE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?code>").unwrap());
static PRE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?pre>").unwrap());

/// Strip markup from a comment body. Code blocks become ``` fences, all
/// other tags are removed, and the result is capped at 3000 chars.
pub fn clean_comment(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let text = html
        .replace("<pre><code>", "```")
        .replace("</code></pre>", "```");
    let text = TAG_RE.replace_all(&text, "");
    let text = text.trim();

    text.chars().take(MAX_COMMENT_LEN).collect()
}

/// Strip markup from an answer body. Code blocks become ``` fences,
/// inline `<code>` becomes a backtick, and remaining tags are removed.
/// Unlike comments, answer bodies are not length-capped.
pub fn clean_answer_body(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let text = html
        .replace("<pre><code>", "```")
        .replace("</code></pre>", "```");
    let text = CODE_TAG_RE.replace_all(&text, "`");
    let text = PRE_TAG_RE.replace_all(&text, "");
    let text = TAG_RE.replace_all(&text, "");

    text.trim().to_string()
}
