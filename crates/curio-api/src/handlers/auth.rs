//! Registration, login, and current-user handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use curio_core::{CreateUserRequest, Error, IssuedToken, PublicUser, UserRepository};

use crate::auth::{hash_password, verify_password, RequireUser};
use crate::error::ApiError;
use crate::state::AppState;

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// OAuth2-password-style login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Token response body.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl From<IssuedToken> for TokenResponse {
    fn from(token: IssuedToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
        }
    }
}

/// `POST /auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = req.username.trim().to_string();
    if username.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required.".to_string(),
        ));
    }

    if state.db.users.find_by_username(&username).await?.is_some() {
        return Err(ApiError::BadRequest(
            "Username already registered.".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;
    let user = state
        .db
        .users
        .insert(CreateUserRequest {
            username,
            email: req.email,
            password_hash,
        })
        .await
        .map_err(|err| match err {
            // Unique-index race between the pre-check and the insert.
            Error::Conflict(msg) => ApiError::BadRequest(msg),
            other => ApiError::from(other),
        })?;

    info!(
        subsystem = "api",
        component = "auth",
        op = "register",
        user_id = %user.id,
        "User registered"
    );

    Ok(Json(user.public()))
}

/// `POST /auth/token`
///
/// Verifies credentials and issues an opaque bearer token with a fixed
/// expiry. The failure message never distinguishes unknown user from wrong
/// password.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .db
        .users
        .find_by_username(form.username.trim())
        .await?
        .filter(|u| u.is_active)
        .filter(|u| verify_password(&form.password, &u.password_hash))
        .ok_or_else(|| ApiError::Unauthorized("Incorrect username or password".to_string()))?;

    let token = state.db.tokens.issue(user.id).await?;

    info!(
        subsystem = "api",
        component = "auth",
        op = "login",
        user_id = %user.id,
        "Token issued"
    );

    Ok(Json(token.into()))
}

/// `GET /auth/user`
pub async fn current_user(RequireUser(user): RequireUser) -> Json<PublicUser> {
    Json(user.public())
}
