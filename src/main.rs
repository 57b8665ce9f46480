//! Spinoza Study Group Portal Backend
//!
//! A production-grade REST backend with SQLite persistence, password
//! sessions, and a generative study-assistant relay.

mod api;
mod assistant;
mod auth;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use assistant::AssistantClient;
use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub assistant: Arc<AssistantClient>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Spinoza Portal Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.jwt_secret == "dev-secret-change-me" {
        tracing::warn!("PORTAL_JWT_SECRET not set. Using the development secret!");
    }
    if config.assistant_api_key.is_none() {
        tracing::warn!(
            "No assistant API key configured (PORTAL_ASSISTANT_API_KEY). \
             The assistant will answer with its fallback message."
        );
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize the assistant relay
    let assistant = Arc::new(AssistantClient::new(
        config.assistant_api_key.clone(),
        config.assistant_model.clone(),
    ));

    // Create application state
    let state = AppState {
        repo,
        assistant,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the signing secret for the auth layer
    let jwt_secret = state.config.jwt_secret.clone();

    // Routes open to everyone
    let public_routes = Router::new()
        // Session
        .route("/auth/signup", post(api::sign_up))
        .route("/auth/signin", post(api::sign_in))
        // Portal snapshot
        .route("/portal", get(api::get_portal))
        // Collections
        .route("/publications", get(api::list_publications))
        .route("/events", get(api::list_events))
        .route("/forum/topics", get(api::list_topics))
        .route("/gallery", get(api::list_gallery))
        .route("/members", get(api::list_members))
        .route("/members/{id}", get(api::get_member))
        // Contact form
        .route("/contact", post(api::create_contact_message))
        // Study assistant
        .route("/assistant", post(api::ask_assistant));

    // Routes requiring a signed-in member
    let member_routes = Router::new()
        .route("/auth/signout", post(api::sign_out))
        .route("/auth/session", get(api::session))
        .route("/profile", put(api::update_profile))
        .route("/publications", post(api::create_publication))
        .route("/events", post(api::create_event))
        .route("/events/{id}", delete(api::delete_event))
        .route("/forum/topics", post(api::create_topic))
        .route("/contact", get(api::list_contact_messages))
        .route("/contact/{id}/read", put(api::mark_message_read))
        .layer(middleware::from_fn(move |req, next| {
            auth::require_auth(jwt_secret.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes.merge(member_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
