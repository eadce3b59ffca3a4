//! Bearer token repository implementation.
//!
//! Tokens are opaque `ck_`-prefixed random secrets. Only the SHA-256 hash
//! is stored; the plaintext exists in the issuance response and nowhere
//! else. Expiry is fixed at issuance, no sliding window.

use chrono::{Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{Pool, Postgres, Row};

use curio_core::defaults::{TOKEN_PREFIX, TOKEN_SECRET_LEN, TOKEN_TTL_MINUTES};
use curio_core::{Error, IssuedToken, Result, User};

/// PostgreSQL implementation of the token store.
pub struct PgTokenRepository {
    pool: Pool<Postgres>,
}

impl PgTokenRepository {
    /// Create a new PgTokenRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Generate a cryptographically random alphanumeric secret.
    fn generate_secret(length: usize) -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| {
                let idx = rng.gen_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }

    /// Hash a token using SHA-256.
    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Issue a new bearer token for a user with the fixed TTL.
    pub async fn issue(&self, user_id: uuid::Uuid) -> Result<IssuedToken> {
        let token = format!("{}{}", TOKEN_PREFIX, Self::generate_secret(TOKEN_SECRET_LEN));
        let now = Utc::now();
        let expires_at = now + Duration::minutes(TOKEN_TTL_MINUTES);

        sqlx::query(
            r#"
            INSERT INTO auth_token (token_hash, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Self::hash_token(&token))
        .bind(user_id)
        .bind(expires_at)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(IssuedToken {
            access_token: token,
            token_type: "bearer".to_string(),
            expires_at,
        })
    }

    /// Resolve a bearer token to its user.
    ///
    /// Returns None for unknown, expired, or deactivated-user tokens; the
    /// caller turns that into Unauthorized before any persistence happens.
    pub async fn resolve(&self, token: &str) -> Result<Option<User>> {
        if !token.starts_with(TOKEN_PREFIX) {
            return Ok(None);
        }

        let row = sqlx::query(
            r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.is_active, u.created_at
            FROM auth_token t
            JOIN app_user u ON u.id = t.user_id
            WHERE t.token_hash = $1 AND t.expires_at > NOW() AND u.is_active
            "#,
        )
        .bind(Self::hash_token(token))
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            username: r.get("username"),
            email: r.get("email"),
            password_hash: r.get("password_hash"),
            is_active: r.get("is_active"),
            created_at: r.get("created_at"),
        }))
    }

    /// Delete expired tokens. Returns the number of rows removed.
    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM auth_token WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(result.rows_affected())
    }
}
