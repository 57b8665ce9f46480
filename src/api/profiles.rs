//! Member directory and profile API endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::{success, ApiResult};
use crate::auth::{current_profile, Claims};
use crate::errors::AppError;
use crate::models::{Profile, UpdateProfileRequest};
use crate::AppState;

/// GET /api/members - List all member profiles.
pub async fn list_members(State(state): State<AppState>) -> ApiResult<Vec<Profile>> {
    let members = state.repo.list_profiles().await?;
    success(members)
}

/// GET /api/members/{id} - Get a single member profile.
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Profile> {
    match state.repo.get_profile(&id).await? {
        Some(profile) => success(profile),
        None => Err(AppError::NotFound(format!("Member {} not found", id))),
    }
}

/// PUT /api/profile - Update the caller's own profile.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<UpdateProfileRequest>,
) -> ApiResult<Profile> {
    let caller = current_profile(&state.repo, &claims).await?;

    if let Some(full_name) = &request.full_name {
        if full_name.trim().is_empty() {
            return Err(AppError::Validation(
                "O nome completo não pode ficar vazio.".to_string(),
            ));
        }
    }

    let profile = state.repo.update_profile(&caller.id, &request).await?;

    success(profile)
}
