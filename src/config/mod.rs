//! Configuration module for the portal backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Secret used to sign session tokens (required in production)
    pub jwt_secret: String,
    /// E-mail whose sign-up is granted the admin role
    pub admin_email: Option<String>,
    /// API key for the generative assistant (assistant disabled without it)
    pub assistant_api_key: Option<String>,
    /// Model served by the assistant endpoint
    pub assistant_model: String,
    /// WhatsApp number behind the chat widget deep link
    pub whatsapp_number: String,
    /// The group's video channel URL
    pub youtube_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("PORTAL_DB_PATH")
            .unwrap_or_else(|_| "./data/portal.sqlite".to_string())
            .into();

        let bind_addr = env::var("PORTAL_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid PORTAL_BIND_ADDR format");

        let log_level = env::var("PORTAL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let jwt_secret =
            env::var("PORTAL_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string());

        let admin_email = env::var("PORTAL_ADMIN_EMAIL").ok();

        let assistant_api_key = env::var("PORTAL_ASSISTANT_API_KEY").ok();

        let assistant_model = env::var("PORTAL_ASSISTANT_MODEL")
            .unwrap_or_else(|_| "gemini-3-flash-preview".to_string());

        let whatsapp_number =
            env::var("PORTAL_WHATSAPP_NUMBER").unwrap_or_else(|_| "+5563999191919".to_string());

        let youtube_url = env::var("PORTAL_YOUTUBE_URL").unwrap_or_else(|_| {
            "https://www.youtube.com/channel/UCTJEBpIkx-ghf5N9TuAsG8g".to_string()
        });

        Self {
            db_path,
            bind_addr,
            log_level,
            jwt_secret,
            admin_email,
            assistant_api_key,
            assistant_model,
            whatsapp_number,
            youtube_url,
        }
    }

    /// WhatsApp deep link with the number reduced to digits.
    pub fn whatsapp_link(&self) -> String {
        let digits: String = self
            .whatsapp_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        format!("https://wa.me/{}", digits)
    }
}
