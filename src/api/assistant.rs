//! Generative-assistant API endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::AppState;

/// Request body for the assistant widget.
#[derive(Debug, Deserialize)]
pub struct AskAssistantRequest {
    pub prompt: String,
    /// Optional context the caller chooses to echo back; the relay
    /// itself keeps no conversation state.
    #[serde(default)]
    pub context: String,
}

/// Reply from the assistant.
#[derive(Debug, Serialize)]
pub struct AssistantReply {
    pub reply: String,
}

/// POST /api/assistant - Forward a question to the study assistant.
pub async fn ask_assistant(
    State(state): State<AppState>,
    Json(request): Json<AskAssistantRequest>,
) -> ApiResult<AssistantReply> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("Escreva uma pergunta.".to_string()));
    }

    let reply = state
        .assistant
        .ask(&request.prompt, &request.context)
        .await;

    success(AssistantReply { reply })
}
