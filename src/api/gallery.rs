//! Gallery API endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::GalleryItem;
use crate::AppState;

/// GET /api/gallery - List gallery items, newest first.
pub async fn list_gallery(State(state): State<AppState>) -> ApiResult<Vec<GalleryItem>> {
    let items = state.repo.list_gallery_items().await?;
    success(items)
}
