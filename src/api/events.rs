//! Event agenda API endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::{success, ApiResult};
use crate::auth::{require_admin, Claims};
use crate::errors::AppError;
use crate::models::{CreateEventRequest, Event};
use crate::AppState;

/// GET /api/events - List the agenda, oldest first by date.
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Vec<Event>> {
    let events = state.repo.list_events().await?;
    success(events)
}

/// POST /api/events - Schedule a meeting. Admin only.
pub async fn create_event(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateEventRequest>,
) -> ApiResult<Event> {
    require_admin(&state.repo, &claims).await?;

    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Informe o título.".to_string()));
    }
    if request.date.trim().is_empty() || request.time.trim().is_empty() {
        return Err(AppError::Validation(
            "Informe a data e o horário do encontro.".to_string(),
        ));
    }
    if request.meeting_link.trim().is_empty() {
        return Err(AppError::Validation(
            "Informe o link do encontro.".to_string(),
        ));
    }

    let event = state.repo.create_event(&request).await?;

    success(event)
}

/// DELETE /api/events/{id} - Remove a meeting from the agenda. Admin only.
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    require_admin(&state.repo, &claims).await?;

    state.repo.delete_event(&id).await?;

    success(())
}
