//! Project Routes
//!
//! Public reads and session-protected writes over the same paths.
//!
//! Routes:
//! - GET /projects - List projects, newest first (public)
//! - GET /projects/:id - Project detail (public)
//! - POST /projects - Create project (session-protected)
//! - PUT /projects/:id - Partial update (session-protected)
//! - DELETE /projects/:id - Delete project (session-protected)
//!
//! Reads and writes share paths, so the whole router runs behind the
//! optional-session middleware and write handlers check for the
//! injected user themselves.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::middleware::{optional_session, SessionUser};
use crate::models::Section;
use crate::{db, AppState, Error, Result};

/// Build project routes.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .layer(axum::middleware::from_fn_with_state(state, optional_session))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Project representation returned to clients. Carries the computed
/// rendering hints alongside the raw fields; `user_id` stays internal.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub title: String,
    pub sections: Vec<Section>,
    pub display_title: String,
    pub has_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_image: Option<String>,
    pub created_at: String,
}

impl From<db::Project> for ProjectResponse {
    fn from(project: db::Project) -> Self {
        let sections = project.sections_vec();
        Self {
            display_title: project.display_title(),
            has_content: project.has_content(),
            first_image: project.first_image(),
            id: project.id,
            title: project.title,
            sections,
            created_at: project.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListProjectsResponse {
    pub projects: Vec<ProjectResponse>,
    pub total: usize,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListProjectsQuery {
    /// Cap the number of results (the dashboard shows the 5 newest).
    pub limit: Option<usize>,
    /// When true, drop projects with no renderable content.
    #[serde(default)]
    pub with_content: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub sections: Option<Vec<Section>>,
}

// ============================================================================
// Handlers
// ============================================================================

/// List projects, newest first.
///
/// GET /projects?limit=5&with_content=true
///
/// A storage failure degrades to an empty list so the public pages
/// render their empty state instead of an error page. The failure is
/// still logged.
#[axum::debug_handler]
async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListProjectsQuery>,
) -> Json<ListProjectsResponse> {
    let projects = match db::list_projects(&state.db).await {
        Ok(projects) => projects,
        Err(e) => {
            error!("Failed to list projects, serving empty list: {}", e);
            Vec::new()
        }
    };

    let mut responses: Vec<ProjectResponse> =
        projects.into_iter().map(ProjectResponse::from).collect();

    if query.with_content {
        responses.retain(|p| p.has_content);
    }
    if let Some(limit) = query.limit {
        responses.truncate(limit);
    }

    let total = responses.len();

    Json(ListProjectsResponse {
        projects: responses,
        total,
    })
}

/// Get a single project.
///
/// GET /projects/:id
///
/// 404 when absent. A found project with nothing to render is still a
/// 200; `has_content: false` lets the client show its distinct
/// "no content" state.
#[axum::debug_handler]
async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProjectResponse>> {
    let project = db::get_project(&state.db, id).await?;
    Ok(Json(ProjectResponse::from(project)))
}

/// Create a project.
///
/// POST /projects
#[axum::debug_handler]
async fn create_project(
    State(state): State<AppState>,
    user: Option<Extension<SessionUser>>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>)> {
    let Extension(user) = user.ok_or(Error::Unauthenticated)?;

    let project = db::create_project(
        &state.db,
        db::CreateProject {
            title: payload.title.unwrap_or_default(),
            sections: payload.sections,
            user_id: user.user_id,
        },
    )
    .await?;

    info!("Created project {}", project.id);

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

/// Partially update a project.
///
/// PUT /projects/:id
///
/// Only fields present in the payload are written; a sections payload
/// replaces the whole array.
#[axum::debug_handler]
async fn update_project(
    State(state): State<AppState>,
    user: Option<Extension<SessionUser>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    user.ok_or(Error::Unauthenticated)?;

    let project = db::update_project(
        &state.db,
        id,
        db::UpdateProject {
            title: payload.title,
            sections: payload.sections,
        },
    )
    .await?;

    Ok(Json(ProjectResponse::from(project)))
}

/// Delete a project.
///
/// DELETE /projects/:id
///
/// Images referenced by the deleted sections are left in the blob
/// store.
#[axum::debug_handler]
async fn delete_project(
    State(state): State<AppState>,
    user: Option<Extension<SessionUser>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    user.ok_or(Error::Unauthenticated)?;

    if !db::delete_project(&state.db, id).await? {
        return Err(Error::NotFound(format!("Project not found: {}", id)));
    }

    info!("Deleted project {}", id);

    Ok(Json(serde_json::json!({ "deleted": true })))
}
