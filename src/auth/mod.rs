//! Password and session-token authentication.
//!
//! Passwords are hashed with Argon2id; sessions are stateless JWT bearer
//! tokens carried in the Authorization header.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Profile, Role};

/// How long a session token stays valid.
const TOKEN_LIFETIME_DAYS: i64 = 30;

/// Claims carried by a session token.
///
/// The role is deliberately not a claim: it is re-read from the profile
/// row on every admin check so a demotion takes effect immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Profile ID of the signed-in member.
    pub sub: String,
    pub username: String,
    pub exp: usize,
}

/// Hash a password with Argon2id and a fresh salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(format!("Stored hash is malformed: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Issue a session token for a profile.
pub fn create_token(secret: &str, profile: &Profile) -> Result<String, AppError> {
    let claims = Claims {
        sub: profile.id.clone(),
        username: profile.username.clone(),
        exp: (chrono::Utc::now() + chrono::Duration::days(TOKEN_LIFETIME_DAYS)).timestamp()
            as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token creation failed: {}", e)))
}

/// Decode and validate a session token.
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Sessão inválida ou expirada.".to_string()))
}

/// Authentication layer: validates the bearer token and injects the
/// claims into request extensions for handlers to consume.
pub async fn require_auth(secret: String, mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    let Some(token) = token else {
        return AppError::Unauthorized("Autenticação necessária.".to_string()).into_response();
    };

    match decode_token(&secret, &token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Resolve the live profile behind a set of claims.
///
/// A token whose profile row has gone away yields the unauthenticated
/// state rather than an internal error.
pub async fn current_profile(
    repo: &crate::db::Repository,
    claims: &Claims,
) -> Result<Profile, AppError> {
    repo.get_profile(&claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Sessão inválida ou expirada.".to_string()))
}

/// Resolve the live profile and require the admin role.
pub async fn require_admin(
    repo: &crate::db::Repository,
    claims: &Claims,
) -> Result<Profile, AppError> {
    let profile = current_profile(repo, claims).await?;
    match profile.role {
        Role::Admin => Ok(profile),
        Role::Member => Err(AppError::Forbidden(
            "Apenas administradores podem executar esta ação.".to_string(),
        )),
    }
}
