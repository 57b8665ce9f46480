//! Publication API endpoints.

use axum::{extract::State, Extension, Json};

use super::{success, ApiResult};
use crate::auth::{require_admin, Claims};
use crate::errors::AppError;
use crate::models::{placeholder_publications, CreatePublicationRequest, Publication};
use crate::AppState;

/// GET /api/publications - List publications, newest first.
///
/// An empty table serves the bundled founding publications; a database
/// failure is an error, so an empty collection and an unreachable one
/// remain distinguishable to the caller.
pub async fn list_publications(State(state): State<AppState>) -> ApiResult<Vec<Publication>> {
    let publications = state.repo.list_publications().await?;

    if publications.is_empty() {
        return success(placeholder_publications());
    }

    success(publications)
}

/// POST /api/publications - Publish a new entry. Admin only.
pub async fn create_publication(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreatePublicationRequest>,
) -> ApiResult<Publication> {
    let author = require_admin(&state.repo, &claims).await?;

    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Informe o título.".to_string()));
    }
    if request.link.trim().is_empty() {
        return Err(AppError::Validation(
            "Informe o link da publicação.".to_string(),
        ));
    }

    let publication = state.repo.create_publication(&request, &author).await?;

    success(publication)
}
