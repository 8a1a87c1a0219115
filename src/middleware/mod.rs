//! Middleware for Vitrine.
//!
//! Session/cookie authentication for the admin write surface. Public
//! read routes carry no auth at all.

mod session_auth;

pub use session_auth::{optional_session, require_session, SessionUser, SESSION_COOKIE_NAME};
