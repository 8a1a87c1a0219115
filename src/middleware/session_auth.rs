//! Session-based authentication middleware.
//!
//! Validates session cookies for admin access.
//!
//! # Session Flow
//!
//! 1. Owner logs in with email + password at `/auth/login`
//! 2. Server creates a session row and sets the `vitrine_session` cookie
//! 3. Subsequent requests include the cookie, validated by this middleware
//! 4. Session expires after the configured duration or on logout
//!
//! # Security Model
//!
//! - Session IDs are cryptographically random (nanoid)
//! - Sessions are stored server-side in the database
//! - Cookie is HttpOnly, SameSite=Lax
//! - Sessions can be invalidated server-side (logout)

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{config::config, db, error::Error, AppState};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "vitrine_session";

/// User context injected into request extensions after successful
/// session validation.
#[derive(Clone, Debug)]
pub struct SessionUser {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: String,
}

/// Middleware that requires a valid session.
///
/// Extracts the session ID from the cookie, validates it against the
/// database, and injects `SessionUser` into request extensions.
///
/// Returns 401 Unauthorized if:
/// - No session cookie present
/// - Session not found in database
/// - Session is expired
/// - User not found
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Error> {
    let session_id = jar
        .get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .ok_or(Error::Unauthenticated)?;

    let session_user = validate_session(&state, &session_id).await?;

    req.extensions_mut().insert(session_user);

    Ok(next.run(req).await)
}

/// Optional session middleware. Doesn't fail without a session, just
/// doesn't inject a user. Handlers that mix public reads and gated
/// writes on the same path take `Option<Extension<SessionUser>>` and
/// decide per-method.
pub async fn optional_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(session_id) = jar.get(SESSION_COOKIE_NAME).map(|c| c.value().to_string()) {
        if let Ok(session_user) = validate_session(&state, &session_id).await {
            req.extensions_mut().insert(session_user);
        }
    }

    next.run(req).await
}

/// Validate a session ID and return the session user.
async fn validate_session(state: &AppState, session_id: &str) -> Result<SessionUser, Error> {
    let config = config();

    let pair = match db::get_session_with_user(&state.db, session_id).await {
        Ok(pair) => pair,
        // Session row pointing at a deleted user
        Err(Error::NotFound(_)) => None,
        Err(e) => return Err(e),
    };

    let Some((session, user)) = pair else {
        // Missing or expired; sweep the row out of the request path
        let pool = state.db.clone();
        let sid = session_id.to_string();
        tokio::spawn(async move {
            let _ = db::delete_session(&pool, &sid).await;
        });
        return Err(Error::Unauthenticated);
    };

    // Sliding expiry: extend sessions past their halfway point
    let max_age = chrono::Duration::seconds(config.session.max_age_seconds as i64);
    let halfway = chrono::Utc::now() + (max_age / 2);

    if let Ok(expires) = chrono::DateTime::parse_from_rfc3339(&session.expires_at) {
        if expires < halfway {
            let new_expires = chrono::Utc::now() + max_age;
            let pool = state.db.clone();
            let sid = session_id.to_string();
            tokio::spawn(async move {
                let _ = db::extend_session(&pool, &sid, new_expires).await;
            });
        }
    }

    Ok(SessionUser {
        user_id: user.id,
        email: user.email,
        display_name: user.display_name,
        role: user.role,
    })
}
