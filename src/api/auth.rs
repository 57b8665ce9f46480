//! Session API endpoints: sign-up, sign-in, sign-out, session lookup.

use axum::{extract::State, Extension, Json};

use super::{success, ApiResult};
use crate::auth::{self, Claims};
use crate::errors::AppError;
use crate::models::{Profile, Role, SessionResponse, SignInRequest, SignUpRequest};
use crate::AppState;

/// POST /api/auth/signup - Create an account.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> ApiResult<Profile> {
    let email = request.email.trim().to_lowercase();
    let username = request.username.trim().to_string();
    let full_name = request.full_name.trim().to_string();

    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("Informe um e-mail válido.".to_string()));
    }
    if request.password.len() < 6 {
        return Err(AppError::Validation(
            "A senha deve ter pelo menos 6 caracteres.".to_string(),
        ));
    }
    if full_name.is_empty() {
        return Err(AppError::Validation(
            "Informe o nome completo.".to_string(),
        ));
    }
    if username.is_empty() {
        return Err(AppError::Validation(
            "Informe um nome de usuário.".to_string(),
        ));
    }

    if state
        .repo
        .get_profile_record_by_email(&email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Este e-mail já está cadastrado no portal.".to_string(),
        ));
    }
    if state.repo.username_exists(&username).await? {
        return Err(AppError::Conflict(
            "Este nome de usuário já está em uso.".to_string(),
        ));
    }

    // The configured bootstrap e-mail becomes the admin account.
    let role = match &state.config.admin_email {
        Some(admin_email) if admin_email.eq_ignore_ascii_case(&email) => Role::Admin,
        _ => Role::Member,
    };

    let password_hash = auth::hash_password(&request.password)?;

    let profile = state
        .repo
        .create_profile(&email, &password_hash, &full_name, &username, role)
        .await?;

    tracing::info!("New member registered: {}", profile.username);

    success(profile)
}

/// POST /api/auth/signin - Exchange credentials for a session token.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> ApiResult<SessionResponse> {
    let email = request.email.trim().to_lowercase();

    let invalid_credentials = || {
        AppError::Unauthorized(
            "E-mail ou senha incorretos. Verifique os dados e tente novamente.".to_string(),
        )
    };

    let record = state
        .repo
        .get_profile_record_by_email(&email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !auth::verify_password(&request.password, &record.password_hash)? {
        return Err(invalid_credentials());
    }

    let token = auth::create_token(&state.config.jwt_secret, &record.profile)?;

    success(SessionResponse {
        token,
        profile: record.profile,
    })
}

/// POST /api/auth/signout - End the session.
///
/// Tokens are self-contained, so the server acknowledges and the client
/// discards the token.
pub async fn sign_out(Extension(claims): Extension<Claims>) -> ApiResult<()> {
    tracing::debug!("Member signed out: {}", claims.username);
    success(())
}

/// GET /api/auth/session - Resolve the current session to a profile.
pub async fn session(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Profile> {
    let profile = auth::current_profile(&state.repo, &claims).await?;
    success(profile)
}
