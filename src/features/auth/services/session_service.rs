//! Login sessions backed by the `sessions` table.
//!
//! A session is a random 32-byte token stored in an HttpOnly cookie. The
//! row maps the token to a role and a user id; expired rows are ignored on
//! lookup and purged whenever a new session is created.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use rand::Rng;
use sqlx::{Row, SqlitePool};

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, UserRole};
use crate::shared::constants::SESSION_COOKIE;

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// Service for session operations
pub struct SessionService {
    pool: SqlitePool,
    config: SessionConfig,
}

impl SessionService {
    pub fn new(pool: SqlitePool, config: SessionConfig) -> Self {
        Self { pool, config }
    }

    /// Create a session for the given identity, returning the token.
    pub async fn create(&self, role: UserRole, user_id: i64) -> Result<String> {
        self.purge_expired().await?;

        let token = generate_token();
        let now = Utc::now().timestamp();
        let expires_at = now.saturating_add(self.config.ttl_secs());

        sqlx::query(
            "INSERT INTO sessions (token, role, user_id, created_at, expires_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&token)
        .bind(role)
        .bind(user_id)
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create session: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(token)
    }

    /// Resolve a token to the identity it was issued for.
    ///
    /// Returns `None` for unknown or expired tokens and for sessions whose
    /// user row no longer exists.
    pub async fn resolve(&self, token: &str) -> Result<Option<AuthenticatedUser>> {
        let row = sqlx::query(
            r#"
            SELECT
                s.role,
                s.user_id,
                CASE s.role
                    WHEN 'customer' THEN (SELECT email FROM customers WHERE customerid = s.user_id)
                    ELSE (SELECT email FROM technicians WHERE technicianid = s.user_id)
                END AS email
            FROM sessions s
            WHERE s.token = ? AND s.expires_at > ?
            "#,
        )
        .bind(token)
        .bind(Utc::now().timestamp())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve session: {:?}", e);
            AppError::Database(e)
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let email: Option<String> = row.try_get("email")?;
        Ok(email.map(|email| AuthenticatedUser {
            user_id: row.get("user_id"),
            role: row.get("role"),
            email,
        }))
    }

    /// Delete a session by token.
    pub async fn revoke(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete session: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(())
    }

    async fn purge_expired(&self) -> Result<()> {
        let purged = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?
            .rows_affected();

        if purged > 0 {
            tracing::debug!("Purged {} expired sessions", purged);
        }
        Ok(())
    }

    /// Cookie carrying a freshly issued token
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        let max_age = time::Duration::seconds(self.config.ttl_secs());
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.cookie_secure)
            .max_age(max_age)
            .build()
    }

    /// Cookie that clears the session token in the browser
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.cookie_secure)
            .max_age(time::Duration::ZERO)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{seed_customer, seed_technician, test_pool};
    use std::time::Duration;

    #[test]
    fn test_generate_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(token, token.to_ascii_lowercase());
        assert_ne!(token, generate_token());
    }

    #[tokio::test]
    async fn test_create_and_resolve_customer_session() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "ada@example.com", "pw").await;
        let sessions = SessionService::new(pool, SessionConfig::default());

        let token = sessions.create(UserRole::Customer, customer.id).await.unwrap();
        let user = sessions.resolve(&token).await.unwrap().unwrap();

        assert_eq!(user.user_id, customer.id);
        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_role_selects_user_table() {
        let pool = test_pool().await;
        // Same numeric id in both tables; the role decides which row is used
        let customer = seed_customer(&pool, "cust@example.com", "pw").await;
        let tech = seed_technician(&pool, "tech@example.com", "pw").await;
        assert_eq!(customer.id, tech.id);
        let sessions = SessionService::new(pool, SessionConfig::default());

        let token = sessions.create(UserRole::Technician, tech.id).await.unwrap();
        let user = sessions.resolve(&token).await.unwrap().unwrap();

        assert_eq!(user.role, UserRole::Technician);
        assert_eq!(user.email, "tech@example.com");
    }

    #[tokio::test]
    async fn test_unknown_and_revoked_tokens() {
        let pool = test_pool().await;
        let tech = seed_technician(&pool, "tech@example.com", "pw").await;
        let sessions = SessionService::new(pool, SessionConfig::default());

        assert!(sessions.resolve("nope").await.unwrap().is_none());

        let token = sessions.create(UserRole::Technician, tech.id).await.unwrap();
        sessions.revoke(&token).await.unwrap();
        assert!(sessions.resolve(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_ignored() {
        let pool = test_pool().await;
        let customer = seed_customer(&pool, "ada@example.com", "pw").await;
        let sessions = SessionService::new(
            pool,
            SessionConfig {
                ttl: Duration::ZERO,
                cookie_secure: false,
            },
        );

        let token = sessions.create(UserRole::Customer, customer.id).await.unwrap();
        assert!(sessions.resolve(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_session_for_missing_user_is_ignored() {
        let pool = test_pool().await;
        let sessions = SessionService::new(pool, SessionConfig::default());

        let token = sessions.create(UserRole::Customer, 999).await.unwrap();
        assert!(sessions.resolve(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cookie_attributes() {
        let pool = sqlx::SqlitePool::connect_lazy("sqlite::memory:").unwrap();
        let sessions = SessionService::new(
            pool,
            SessionConfig {
                ttl: Duration::from_secs(3600),
                cookie_secure: true,
            },
        );

        let cookie = sessions.session_cookie("abc".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(1)));

        let removal = sessions.removal_cookie();
        assert_eq!(removal.value(), "");
        assert_eq!(removal.max_age(), Some(time::Duration::ZERO));
    }
}
