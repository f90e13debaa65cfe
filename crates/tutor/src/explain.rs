//! Step-by-step explanations for a wrong answer.

use crate::client::{TutorClient, TutorError};

/// System prompt for the explanation persona.
const EXPLAIN_SYSTEM_PROMPT: &str = "You are a kind math teacher for children in grades 2-3. \
     Explain in very simple words, briefly. Do not write long introductions.";

/// Token/temperature budget for an explanation call.
const EXPLAIN_MAX_TOKENS: u32 = 150;
const EXPLAIN_TEMPERATURE: f32 = 0.4;

/// Substituted when the model replies with empty text. An empty hint is
/// still worse than this fixed line, while a backend failure stays an error.
pub const FALLBACK_HINT: &str = "Hint unavailable.";

impl TutorClient {
    /// Produce a short explanation of the correct solution.
    pub async fn explain(
        &self,
        question: &str,
        correct_answer: &str,
        user_answer: &str,
    ) -> Result<String, TutorError> {
        let user_prompt = format!(
            "Task: {question}\n\
             Correct answer: {correct_answer}\n\
             Child's answer: {user_answer}\n\n\
             Give 3 simple solution steps."
        );

        let reply = self
            .chat(
                EXPLAIN_SYSTEM_PROMPT,
                &user_prompt,
                EXPLAIN_MAX_TOKENS,
                EXPLAIN_TEMPERATURE,
            )
            .await?;

        let trimmed = reply.trim();
        if trimmed.is_empty() {
            return Ok(FALLBACK_HINT.to_string());
        }
        Ok(trimmed.to_string())
    }
}
