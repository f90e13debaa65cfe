//! Handlers for the tutor family: task generation and explanations.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use classbum_core::error::CoreError;
use classbum_tutor::GeneratedTask;

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /explain`.
///
/// Answers arrive as raw JSON values because clients send both numbers and
/// strings; they are flattened to text for the prompt.
#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    pub question: Option<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: Option<serde_json::Value>,
    #[serde(rename = "userAnswer")]
    pub user_answer: Option<serde_json::Value>,
}

/// Response for `POST /explain`.
#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /generate-task
///
/// One freshly generated multiplication task. A malformed model reply is a
/// 500 with the raw text attached -- never a fabricated task.
pub async fn generate_task(State(state): State<AppState>) -> AppResult<Json<GeneratedTask>> {
    let task = state.tutor.generate_task().await?;
    Ok(Json(task))
}

/// Render a JSON answer value as prompt text (strings lose their quotes).
fn answer_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// POST /explain
pub async fn explain(
    State(state): State<AppState>,
    Json(input): Json<ExplainRequest>,
) -> AppResult<Json<ExplainResponse>> {
    let (question, correct, user) = match (
        input.question.as_deref(),
        input.correct_answer.as_ref(),
        input.user_answer.as_ref(),
    ) {
        (Some(q), Some(c), Some(u)) if !q.is_empty() => (q, c, u),
        _ => return Err(CoreError::Validation("missing_fields").into()),
    };

    let explanation = state
        .tutor
        .explain(question, &answer_text(correct), &answer_text(user))
        .await?;

    Ok(Json(ExplainResponse { explanation }))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Routes mounted at the root level.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-task", get(generate_task))
        .route("/explain", post(explain))
}
