//! User database queries.
//!
//! Vitrine has a single kind of user: the site owner logging in with
//! email and password to manage portfolio content.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::DbPool;

/// User record from the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Argon2id hash in PHC string format. Never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: String,
    pub last_login: Option<String>,
}

/// Input for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
}

/// Create a new user.
pub async fn create_user(pool: &DbPool, input: CreateUser) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, password_hash, display_name)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.id)
    .bind(&input.email)
    .bind(&input.password_hash)
    .bind(&input.display_name)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            Error::AlreadyExists(format!("User with email '{}' already exists", input.email))
        }
        _ => Error::Database(e),
    })
}

/// Get a user by ID.
pub async fn get_user(pool: &DbPool, id: &str) -> Result<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User not found: {}", id)))
}

/// Get a user by email (login lookup).
pub async fn get_user_by_email(pool: &DbPool, email: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(Error::Database)
}

/// Update user's last login timestamp.
pub async fn update_last_login(pool: &DbPool, id: &str) -> Result<()> {
    sqlx::query("UPDATE users SET last_login = datetime('now') WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Count total users.
pub async fn count_users(pool: &DbPool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_pool, initialize_schema};

    async fn setup_test_db() -> DbPool {
        let pool = init_pool(":memory:").await.unwrap();
        initialize_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let pool = setup_test_db().await;

        let user = create_user(&pool, CreateUser {
            id: "user-1".to_string(),
            email: "owner@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            display_name: Some("Owner".to_string()),
        }).await.unwrap();

        assert_eq!(user.id, "user-1");
        assert_eq!(user.role, "admin");

        let fetched = get_user(&pool, "user-1").await.unwrap();
        assert_eq!(fetched.email, "owner@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_error() {
        let pool = setup_test_db().await;

        create_user(&pool, CreateUser {
            id: "user-1".to_string(),
            email: "dup@example.com".to_string(),
            password_hash: "x".to_string(),
            display_name: None,
        }).await.unwrap();

        let result = create_user(&pool, CreateUser {
            id: "user-2".to_string(),
            email: "dup@example.com".to_string(),
            password_hash: "y".to_string(),
            display_name: None,
        }).await;

        assert!(matches!(result, Err(Error::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_by_email_missing() {
        let pool = setup_test_db().await;

        let user = get_user_by_email(&pool, "missing@example.com").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_last_login() {
        let pool = setup_test_db().await;

        create_user(&pool, CreateUser {
            id: "user-1".to_string(),
            email: "owner@example.com".to_string(),
            password_hash: "x".to_string(),
            display_name: None,
        }).await.unwrap();

        update_last_login(&pool, "user-1").await.unwrap();
        let user = get_user(&pool, "user-1").await.unwrap();
        assert!(user.last_login.is_some());
    }
}
