//! Authentication Routes
//!
//! Email + password login for the site owner.
//!
//! Routes:
//! - POST /auth/login - Verify credentials, set session cookie
//! - POST /auth/logout - Destroy session, clear cookie (session-protected)
//! - GET /auth/me - Identity echo (session-protected)

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::middleware::{require_session, SessionUser, SESSION_COOKIE_NAME};
use crate::{config::config, db, services, AppState, Error, Result};

/// Build auth routes.
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
        .layer(axum::middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/login", post(login))
        .merge(protected)
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Log in with email and password.
///
/// POST /auth/login
///
/// On success, creates a server-side session and sets the session
/// cookie. Wrong email and wrong password are indistinguishable to
/// the caller.
#[axum::debug_handler]
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>)> {
    let config = config();

    let user = db::get_user_by_email(&state.db, &payload.email)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    if !services::verify_password(&payload.password, &user.password_hash)? {
        return Err(Error::InvalidCredentials);
    }

    let max_age = config.session.max_age_seconds;
    let session = db::create_session(
        &state.db,
        db::CreateSession {
            id: nanoid::nanoid!(),
            user_id: user.id.clone(),
            expires_at: chrono::Utc::now() + chrono::Duration::seconds(max_age as i64),
        },
    )
    .await?;

    db::update_last_login(&state.db, &user.id).await?;

    info!("User {} logged in", user.email);

    let cookie = Cookie::build((SESSION_COOKIE_NAME, session.id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age as i64))
        .build();

    Ok((
        jar.add(cookie),
        Json(UserResponse {
            user_id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
        }),
    ))
}

/// Log out: destroy the session and clear the cookie.
///
/// POST /auth/logout
#[axum::debug_handler]
async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        db::delete_session(&state.db, cookie.value()).await?;
    }

    let removal = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .build();

    Ok((jar.remove(removal), StatusCode::NO_CONTENT))
}

/// Identity echo for the logged-in user.
///
/// GET /auth/me
#[axum::debug_handler]
async fn me(Extension(user): Extension<SessionUser>) -> Json<UserResponse> {
    Json(UserResponse {
        user_id: user.user_id,
        email: user.email,
        display_name: user.display_name,
        role: user.role,
    })
}
