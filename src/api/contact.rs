//! Contact message API endpoints.
//!
//! Anyone may leave a message; reading and flagging the inbox is
//! restricted to administrators.

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::{success, ApiResult};
use crate::auth::{require_admin, Claims};
use crate::errors::AppError;
use crate::models::{ContactMessage, CreateContactMessageRequest};
use crate::AppState;

/// POST /api/contact - Leave a message. Public.
pub async fn create_contact_message(
    State(state): State<AppState>,
    Json(request): Json<CreateContactMessageRequest>,
) -> ApiResult<ContactMessage> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Informe o seu nome.".to_string()));
    }
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(AppError::Validation("Informe um e-mail válido.".to_string()));
    }
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("Escreva a mensagem.".to_string()));
    }

    let message = state.repo.create_contact_message(&request).await?;

    success(message)
}

/// GET /api/contact - List the inbox, newest first. Admin only.
pub async fn list_contact_messages(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Vec<ContactMessage>> {
    require_admin(&state.repo, &claims).await?;

    let messages = state.repo.list_contact_messages().await?;
    success(messages)
}

/// PUT /api/contact/{id}/read - Flip the read flag. Admin only.
pub async fn mark_message_read(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> ApiResult<ContactMessage> {
    require_admin(&state.repo, &claims).await?;

    let message = state.repo.mark_message_read(&id).await?;
    success(message)
}
