use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chat::validation::validate_prompt;
use crate::errors::AppError;
use crate::format::{self, FormatMode};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    /// Requested rendering mode. Absent means enhanced; unknown values fall
    /// back to plain text.
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    /// The mode that was actually applied.
    pub format: &'static str,
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if let Some(reason) = validate_prompt(&req.prompt) {
        return Err(AppError::Validation(reason.to_string()));
    }

    let raw = state.llm.complete(&req.prompt).await?;

    let mode = FormatMode::parse(req.format.as_deref());
    debug!("Formatting response with mode {}", mode.as_str());

    Ok(Json(ChatResponse {
        response: format::format(&raw, mode),
        format: mode.as_str(),
    }))
}
