//! Multiplication task generation.
//!
//! The model is free text, so its reply is treated as untrusted input:
//! optional code fences are stripped, the remainder must parse into
//! [`GeneratedTask`], and the answer must fall inside the single-digit
//! multiplication table. Anything else is a [`TutorError::Format`] carrying
//! the raw reply -- the service never fabricates a fallback task.

use serde::{Deserialize, Serialize};

use crate::client::{TutorClient, TutorError};

/// System prompt constraining the model to one table-of-multiplication task
/// in a strict JSON shape.
const TASK_SYSTEM_PROMPT: &str = r#"You generate multiplication-table practice tasks for children in grades 2-3.

Each time, produce ONE NEW multiplication task within the 1x1 to 10x10 table.

REQUIREMENTS:

1. Always produce exactly one multiplication task.
2. Use only natural numbers from 1 to 10 inclusive.
3. The question format is strictly: "How much is A × B?"
4. No division, addition, subtraction, fractions, or brackets.
5. Vary the tasks -- do not repeat the same A × B too often.
6. Use the multiplication sign: ×
7. The answer is ALWAYS a single number.
8. Return exactly this JSON:

{
  "question": "How much is A × B?",
  "answer": NUMBER,
  "answer_type": "number",
  "grade": "grade 2",
  "est_time": "1 minute"
}

No commentary, JSON only."#;

/// User prompt paired with [`TASK_SYSTEM_PROMPT`].
const TASK_USER_PROMPT: &str = "Generate 1 multiplication-table task.";

/// Token/temperature budget for a generation call.
const TASK_MAX_TOKENS: u32 = 200;
const TASK_TEMPERATURE: f32 = 1.0;

/// Largest possible product in the 1-10 multiplication table.
const MAX_ANSWER: i64 = 100;

/// A parsed, contract-checked multiplication task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedTask {
    pub question: String,
    pub answer: i64,
    pub answer_type: String,
    pub grade: String,
    pub est_time: String,
}

/// Strip an optional Markdown code-fence wrapper from a model reply.
///
/// Handles both ```json and bare ``` fences; text without fences is returned
/// trimmed and otherwise untouched.
fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let mut inner = trimmed.to_string();
    // Case-insensitive removal of the ```json opener, then any bare fences.
    for opener in ["```json", "```JSON", "```Json"] {
        inner = inner.replace(opener, "");
    }
    inner.replace("```", "").trim().to_string()
}

/// Parse a raw model reply into a [`GeneratedTask`].
///
/// Fails with [`TutorError::Format`] (raw text attached) when the reply is
/// not valid JSON for the expected shape or the answer is outside 1..=100.
pub fn parse_task_reply(raw: &str) -> Result<GeneratedTask, TutorError> {
    let cleaned = strip_code_fences(raw);

    let task: GeneratedTask =
        serde_json::from_str(&cleaned).map_err(|_| TutorError::Format { raw: cleaned.clone() })?;

    if task.answer < 1 || task.answer > MAX_ANSWER {
        return Err(TutorError::Format { raw: cleaned });
    }

    Ok(task)
}

impl TutorClient {
    /// Generate one multiplication task. Single attempt; the caller may retry.
    pub async fn generate_task(&self) -> Result<GeneratedTask, TutorError> {
        let reply = self
            .chat(
                TASK_SYSTEM_PROMPT,
                TASK_USER_PROMPT,
                TASK_MAX_TOKENS,
                TASK_TEMPERATURE,
            )
            .await?;

        parse_task_reply(&reply)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const WELL_FORMED: &str = r#"{
        "question": "How much is 7 × 8?",
        "answer": 56,
        "answer_type": "number",
        "grade": "grade 2",
        "est_time": "1 minute"
    }"#;

    #[test]
    fn parses_plain_json() {
        let task = parse_task_reply(WELL_FORMED).expect("well-formed reply should parse");
        assert_eq!(task.question, "How much is 7 × 8?");
        assert_eq!(task.answer, 56);
        assert_eq!(task.answer_type, "number");
    }

    #[test]
    fn strips_json_code_fence() {
        let fenced = format!("```json\n{WELL_FORMED}\n```");
        let task = parse_task_reply(&fenced).expect("fenced reply should parse");
        assert_eq!(task.answer, 56);
        assert!(task.answer >= 1 && task.answer <= 100);
    }

    #[test]
    fn strips_bare_code_fence() {
        let fenced = format!("```\n{WELL_FORMED}\n```");
        let task = parse_task_reply(&fenced).expect("bare-fenced reply should parse");
        assert_eq!(task.answer, 56);
    }

    #[test]
    fn unparseable_reply_carries_raw_text() {
        let err = parse_task_reply("Sorry, I cannot do that.").unwrap_err();
        assert_matches!(err, TutorError::Format { raw } => {
            assert_eq!(raw, "Sorry, I cannot do that.");
        });
    }

    #[test]
    fn empty_reply_is_a_format_error() {
        let err = parse_task_reply("").unwrap_err();
        assert_matches!(err, TutorError::Format { .. });
    }

    #[test]
    fn out_of_table_answer_is_rejected() {
        let reply = r#"{
            "question": "How much is 20 × 20?",
            "answer": 400,
            "answer_type": "number",
            "grade": "grade 2",
            "est_time": "1 minute"
        }"#;
        let err = parse_task_reply(reply).unwrap_err();
        assert_matches!(err, TutorError::Format { .. });
    }

    #[test]
    fn zero_answer_is_rejected() {
        let reply = r#"{
            "question": "How much is 0 × 5?",
            "answer": 0,
            "answer_type": "number",
            "grade": "grade 2",
            "est_time": "1 minute"
        }"#;
        let err = parse_task_reply(reply).unwrap_err();
        assert_matches!(err, TutorError::Format { .. });
    }
}
