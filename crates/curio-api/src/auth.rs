//! Authentication: password hashing and the bearer-token extractor.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use curio_core::{Error, Result, User};

use crate::error::ApiError;
use crate::state::AppState;

/// Hash a password with argon2id and a fresh salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash.
///
/// A malformed stored hash verifies as false rather than erroring; the
/// login path treats it the same as a wrong password.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Extractor that requires a valid bearer token.
///
/// Resolves `Authorization: Bearer ck_…` to an active user before the
/// handler body runs; any failure is a 401 issued before persistence is
/// touched.
///
/// Usage:
/// ```ignore
/// async fn my_handler(RequireUser(user): RequireUser) -> impl IntoResponse {
///     // user is authenticated here
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = match auth_header {
            Some(header) if header.starts_with("Bearer ") => {
                header.trim_start_matches("Bearer ").trim()
            }
            _ => {
                return Err(ApiError::Unauthorized(
                    "Authentication required".to_string(),
                ))
            }
        };

        match state.db.tokens.resolve(token).await {
            Ok(Some(user)) => Ok(RequireUser(user)),
            Ok(None) => Err(ApiError::Unauthorized(
                "Invalid or expired token".to_string(),
            )),
            Err(err) => Err(ApiError::from(err)),
        }
    }
}
