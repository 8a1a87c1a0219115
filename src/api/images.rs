//! Image Routes
//!
//! Upload and serving for section images.
//!
//! Routes:
//! - POST /images - Multipart upload (session-protected)
//! - GET /media/*key - Public blob serving with 1-hour caching
//!
//! Upload is phase one of a two-phase write: the returned URL is only
//! handed out once the bytes are durable, and the client embeds it in
//! a project write afterwards. Upload errors therefore propagate to
//! the caller instead of being swallowed.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use crate::middleware::require_session;
use crate::services::CACHE_CONTROL;
use crate::{config::config, AppState, Error, Result};

/// Build image routes.
pub fn routes(state: AppState) -> Router<AppState> {
    let upload = Router::new()
        .route("/images", post(upload_image))
        .layer(axum::middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/media/*key", get(serve_image))
        .merge(upload)
}

/// Upload response. The URL is durable by the time the client sees it.
#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    pub url: String,
    pub key: String,
}

/// Upload an image.
///
/// POST /images
///
/// Accepts multipart/form-data with a single file field named "file".
/// Only image content types are accepted, up to the configured size.
#[axum::debug_handler]
async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadImageResponse>> {
    let config = config();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidInput(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        if field_name != "file" {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".into());

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".into());

        if !content_type.starts_with("image/") {
            return Err(Error::InvalidFileType(content_type));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::InvalidInput(format!("Failed to read file: {}", e)))?;

        if data.len() > config.media.max_image_size {
            return Err(Error::FileTooLarge {
                max_size: config.media.max_image_size,
            });
        }

        let (url, key) = state.images.upload(&filename, &data).await?;

        info!("Uploaded image {} ({} bytes)", key, data.len());

        return Ok(Json(UploadImageResponse { url, key }));
    }

    Err(Error::InvalidInput("No file provided".into()))
}

/// Serve a stored image.
///
/// GET /media/*key
///
/// Blobs are immutable, so responses carry a 1-hour Cache-Control.
#[axum::debug_handler]
async fn serve_image(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response> {
    let data = state.images.read(&key).await?;

    let content_type = mime_guess::from_path(&key)
        .first_or_octet_stream()
        .to_string();

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, CACHE_CONTROL)
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| Error::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
