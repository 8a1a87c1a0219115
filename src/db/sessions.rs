//! Web session database queries.
//!
//! Sessions are server-side rows keyed by a random id that the client
//! carries in an HttpOnly cookie. Expiry is sliding: the auth
//! middleware extends sessions that are past their halfway point.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{get_user, DbPool, User};

/// Web session record.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub expires_at: String,
    pub created_at: String,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        if let Ok(expires) = DateTime::parse_from_rfc3339(&self.expires_at) {
            expires < Utc::now()
        } else {
            true // If we can't parse, treat as expired
        }
    }
}

/// Input for creating a session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub id: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Create a new session.
pub async fn create_session(pool: &DbPool, input: CreateSession) -> Result<Session> {
    sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (id, user_id, expires_at)
        VALUES (?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.id)
    .bind(&input.user_id)
    .bind(input.expires_at.to_rfc3339())
    .fetch_one(pool)
    .await
    .map_err(Error::Database)
}

/// Get a session by ID.
pub async fn get_session(pool: &DbPool, id: &str) -> Result<Option<Session>> {
    sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Error::Database)
}

/// Get session with associated user, or None if missing or expired.
pub async fn get_session_with_user(pool: &DbPool, session_id: &str) -> Result<Option<(Session, User)>> {
    let session = match get_session(pool, session_id).await? {
        Some(s) if !s.is_expired() => s,
        _ => return Ok(None),
    };

    let user = get_user(pool, &session.user_id).await?;
    Ok(Some((session, user)))
}

/// Extend a session's expiry.
pub async fn extend_session(
    pool: &DbPool,
    id: &str,
    expires_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query("UPDATE sessions SET expires_at = ? WHERE id = ?")
        .bind(expires_at.to_rfc3339())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a session.
pub async fn delete_session(pool: &DbPool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete expired sessions. Expiries are stored as RFC3339 UTC, so a
/// string comparison against now-as-RFC3339 is exact.
pub async fn cleanup_expired_sessions(pool: &DbPool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
