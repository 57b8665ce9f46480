//! Forum API endpoints.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::auth::{current_profile, Claims};
use crate::errors::AppError;
use crate::models::{CreateTopicRequest, ForumCategory, ForumTopic};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TopicFilter {
    /// One of the six debate areas; omitted means all.
    pub category: Option<String>,
}

/// GET /api/forum/topics - List topics, newest first, optionally by category.
pub async fn list_topics(
    State(state): State<AppState>,
    Query(filter): Query<TopicFilter>,
) -> ApiResult<Vec<ForumTopic>> {
    let category = match filter.category.as_deref() {
        Some(raw) => Some(ForumCategory::from_str(raw).ok_or_else(|| {
            AppError::BadRequest(format!("Categoria desconhecida: {}", raw))
        })?),
        None => None,
    };

    let topics = state.repo.list_topics(category).await?;
    success(topics)
}

/// POST /api/forum/topics - Open a topic. Any signed-in member.
pub async fn create_topic(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateTopicRequest>,
) -> ApiResult<ForumTopic> {
    let author = current_profile(&state.repo, &claims).await?;

    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Informe o título.".to_string()));
    }
    if request.content.trim().is_empty() {
        return Err(AppError::Validation(
            "Escreva o conteúdo do tópico.".to_string(),
        ));
    }

    let topic = state.repo.create_topic(&request, &author).await?;

    success(topic)
}
