//! Portal snapshot endpoint.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::{placeholder_publications, PortalLinks, PortalSnapshot};
use crate::AppState;

/// GET /api/portal - Everything the frontend needs on first load.
///
/// The five collection reads run concurrently. Any failed read fails
/// the whole request; only a publications table that is genuinely empty
/// falls back to the bundled founding publications.
pub async fn get_portal(State(state): State<AppState>) -> ApiResult<PortalSnapshot> {
    let (publications, events, topics, gallery, members) = tokio::join!(
        state.repo.list_publications(),
        state.repo.list_events(),
        state.repo.list_topics(None),
        state.repo.list_gallery_items(),
        state.repo.list_profiles(),
    );

    let mut publications = publications?;
    if publications.is_empty() {
        publications = placeholder_publications();
    }

    success(PortalSnapshot {
        publications,
        events: events?,
        topics: topics?,
        gallery: gallery?,
        members: members?,
        links: PortalLinks {
            whatsapp: state.config.whatsapp_link(),
            youtube: state.config.youtube_url.clone(),
        },
    })
}
