//! Vitrine - portfolio content server.
//!
//! A self-hosted backend for a personal portfolio site: projects made
//! of ordered sections, email+password admin auth, and a local image
//! blob store with stable public URLs.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
mod state;

pub use config::config;
pub use error::{Error, Result};
pub use state::AppState;
