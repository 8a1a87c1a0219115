//! Startup bootstrap: seed the admin user.
//!
//! The site has exactly one write path and it belongs to the owner.
//! When ADMIN_EMAIL and ADMIN_PASSWORD are both set and no user with
//! that email exists yet, one is created at startup.

use tracing::{info, warn};

use crate::config::config;
use crate::db::{self, DbPool};
use crate::services::hash_password;
use crate::Result;

/// Seed the admin user from configuration, if configured and absent.
pub async fn bootstrap_admin(pool: &DbPool) -> Result<()> {
    let admin = &config().admin;

    let (email, password) = match (&admin.email, &admin.password) {
        (Some(e), Some(p)) => (e, p),
        _ => {
            if db::count_users(pool).await? == 0 {
                warn!("No users exist and ADMIN_EMAIL/ADMIN_PASSWORD are not set; writes will be impossible");
            }
            return Ok(());
        }
    };

    if db::get_user_by_email(pool, email).await?.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(password)?;
    let user = db::create_user(
        pool,
        db::CreateUser {
            id: nanoid::nanoid!(),
            email: email.clone(),
            password_hash,
            display_name: None,
        },
    )
    .await?;

    info!("Bootstrapped admin user {}", user.email);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_pool, initialize_schema};

    // bootstrap_admin reads the global config; exercising the
    // "already exists" early return is enough without env juggling.
    #[tokio::test]
    async fn test_bootstrap_skips_existing_user() {
        let pool = init_pool(":memory:").await.unwrap();
        initialize_schema(&pool).await.unwrap();

        db::create_user(
            &pool,
            db::CreateUser {
                id: "user-1".to_string(),
                email: "owner@example.com".to_string(),
                password_hash: "x".to_string(),
                display_name: None,
            },
        )
        .await
        .unwrap();

        bootstrap_admin(&pool).await.unwrap();
        assert_eq!(db::count_users(&pool).await.unwrap(), 1);
    }
}
