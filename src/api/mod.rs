//! API Routes for Vitrine
//!
//! This module combines all API routes into a single router.
//! Routes are organized by domain and apply appropriate middleware.

mod auth;
mod images;
mod projects;
pub mod status;

use axum::Router;

use crate::AppState;

/// Build the complete API router.
///
/// Route structure:
/// - /health - Health check (public)
/// - /auth/* - Authentication (mixed public/session-protected)
/// - /projects/* - Public reads, session-protected writes
/// - /images - Session-protected multipart upload
/// - /media/* - Public blob serving
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(status::routes())
        .nest("/auth", auth::routes(state.clone()))
        .merge(projects::routes(state.clone()))
        .merge(images::routes(state))
}
