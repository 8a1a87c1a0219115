//! Application state for Vitrine.
//!
//! Contains the shared state that is passed to all handlers.

use std::sync::Arc;

use crate::db::DbPool;
use crate::services::ImageStore;
use crate::{config, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DbPool,
    /// Image blob store.
    pub images: Arc<ImageStore>,
}

impl AppState {
    /// Create a new application state from the global configuration.
    pub async fn new() -> Result<Self> {
        let config = config::config();

        let db = crate::db::init_pool(&config.database.path).await?;
        crate::db::initialize_schema(&db).await?;

        let images = Arc::new(ImageStore::new(
            &config.media.root,
            &config.server.public_url,
        ));

        Ok(Self { db, images })
    }
}
