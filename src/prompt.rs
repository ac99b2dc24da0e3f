//! Prompt templates for the LLM calls.
//!
//! Three templates: the per-intent explanation prompt (in an assistant or
//! Stack-contributor voice), the search-query compression prompt, and the
//! structured review prompt that demands strict JSON back.

use crate::model::Intent;

/// Voice of the explanation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptVoice {
    /// Concise dev-assistant voice
    Assistant,
    /// Senior Stack Overflow contributor voice
    StackContributor,
}

const BASE_ASSISTANT: &str = "\
You are StackSense, an AI dev assistant.
Be concise, clear, and practical.
";

const BASE_STACK: &str = "\
You are a senior Stack Overflow contributor.

Rules:
- Be strictly technically correct.
- If the question or explanation contains an incorrect claim, correct it explicitly.
- Do NOT invent internal behavior.
- Prefer precise, minimal explanations.
- Answer like a highly upvoted Stack Overflow post.
";

const LANGUAGE_HINT: &str = "\
Before answering:
1. Identify the programming language.
2. If JavaScript, explain JavaScript behavior.
3. If Python, explain Python behavior.
4. If unclear, say so explicitly.
";

/// Build the explanation prompt for an intent over the user's content.
pub fn explanation_prompt(intent: Intent, content: &str, voice: PromptVoice) -> String {
    let base = match voice {
        PromptVoice::Assistant => BASE_ASSISTANT,
        PromptVoice::StackContributor => BASE_STACK,
    };

    let task = match intent {
        Intent::Explain => "Explain the following:",
        Intent::Debug => "Help debug this issue:",
        Intent::Improve => "Suggest improvements for:",
        Intent::Unknown => "Question:",
    };

    format!("{base}\n{LANGUAGE_HINT}\n{task}\n{content}\n")
}

/// Build the prompt that compresses raw content into a short search query.
pub fn search_query_prompt(raw_content: &str) -> String {
    format!(
        "\
Convert the following code or description into a concise Stack Overflow search query.
Rules:
- Do NOT include code
- Use plain English
- Focus on the error or unexpected behavior
- Keep it under 12 words

Content:
{raw_content}

Return ONLY the search query.
"
    )
}

/// Build the structured review prompt over serialized stack data.
///
/// The model is told to return strictly valid JSON in the documented
/// verdict shape; the caller still parses defensively.
pub fn review_prompt(stack_data_json: &str, user_question: &str) -> String {
    format!(
        "\
You are StackSense, an expert technical reviewer.

For EACH answer, assign:
- badge: GOLD | SILVER | BRONZE | WARNING
- reason: short explanation

Criteria:
GOLD:
- Technically correct
- Accepted OR very high votes
- Matches current language behavior

SILVER:
- Mostly correct
- Minor caveats
- Reasonable votes

BRONZE:
- Partially correct
- Incomplete or workaround-based

WARNING:
- Incorrect, misleading, outdated, or low confidence

Return ONLY valid JSON.
Do not include explanations, markdown, or extra text.
If unsure, still return JSON.

{{
  \"summary\": \"short explanation\",
  \"answers\": [
    {{
      \"questionTitle\": \"\",
      \"answerIndex\": 0,
      \"badge\": \"GOLD\",
      \"reason\": \"\"
    }}
  ]
}}

Stack Data:
{stack_data_json}

User Question:
{user_question}
"
    )
}
