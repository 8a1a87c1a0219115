//! Project database queries.
//!
//! Projects are the only portfolio entity: a title plus an ordered list
//! of sections, embedded by value as a JSON array in a TEXT column.
//! Sections have no identity or lifecycle of their own.

use crate::models::{filter_empty_sections, Section};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::DbPool;

// ============================================================================
// Types
// ============================================================================

/// Project record from the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    /// May be blank; blank is meaningful (rendering falls back to a
    /// section title or a placeholder).
    pub title: String,
    /// JSON-encoded array of sections.
    pub sections: String,
    pub user_id: String,
    pub created_at: String,
}

impl Project {
    /// Decode the sections column. A corrupt column yields an empty
    /// list rather than an error; readers never fail on bad rows.
    pub fn sections_vec(&self) -> Vec<Section> {
        serde_json::from_str(&self.sections).unwrap_or_default()
    }

    /// True when the project has a non-blank title or at least one
    /// non-empty section.
    pub fn has_content(&self) -> bool {
        crate::models::has_content(&self.title, &self.sections_vec())
    }

    /// Title to render: own title, else first section title, else a
    /// fixed placeholder.
    pub fn display_title(&self) -> String {
        crate::models::display_title(&self.title, &self.sections_vec())
    }

    /// URL of the first section image, if any.
    pub fn first_image(&self) -> Option<String> {
        crate::models::first_image(&self.sections_vec())
    }
}

/// Input for creating a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub sections: Vec<Section>,
    pub user_id: String,
}

/// Input for updating a project. Only fields that are Some are
/// written; sections replacement is whole-array.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub sections: Option<Vec<Section>>,
}

// ============================================================================
// Queries
// ============================================================================

/// Create a new project. Fully-empty input sections are dropped
/// before persistence; filtering applies at creation only.
pub async fn create_project(pool: &DbPool, input: CreateProject) -> Result<Project> {
    let sections = filter_empty_sections(input.sections);
    let sections_json = serde_json::to_string(&sections)?;

    sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (title, sections, user_id)
        VALUES (?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&sections_json)
    .bind(&input.user_id)
    .fetch_one(pool)
    .await
    .map_err(Error::Database)
}

/// Get a project by ID.
pub async fn get_project(pool: &DbPool, id: i64) -> Result<Project> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Project not found: {}", id)))
}

/// Update a project. Absent fields are left untouched (last write
/// wins; there is no version column).
pub async fn update_project(pool: &DbPool, id: i64, input: UpdateProject) -> Result<Project> {
    let mut updates = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(title) = input.title {
        updates.push("title = ?");
        bindings.push(title);
    }
    if let Some(sections) = input.sections {
        // Whole-array replace, stored verbatim; empty-section
        // filtering applies at creation only.
        updates.push("sections = ?");
        bindings.push(serde_json::to_string(&sections)?);
    }

    if updates.is_empty() {
        return get_project(pool, id).await;
    }

    let query = format!(
        "UPDATE projects SET {} WHERE id = ? RETURNING *",
        updates.join(", ")
    );

    let mut q = sqlx::query_as::<_, Project>(&query);
    for binding in &bindings {
        q = q.bind(binding);
    }
    q = q.bind(id);

    q.fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Project not found: {}", id)))
}

/// Delete a project. Returns whether a row was actually removed.
/// Images referenced by the deleted sections are left in place.
pub async fn delete_project(pool: &DbPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// List all projects, newest first. Ties on created_at (sub-second
/// inserts) fall back to id order so the result is deterministic.
pub async fn list_projects(pool: &DbPool) -> Result<Vec<Project>> {
    sqlx::query_as::<_, Project>(
        "SELECT * FROM projects ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
    .map_err(Error::Database)
}
