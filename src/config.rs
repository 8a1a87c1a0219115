//! Configuration management for Vitrine.
//!
//! Loads configuration from environment variables (with .env support):
//! server binding, database path, session lifetime, media storage,
//! and optional admin bootstrap credentials.

use std::env;
use std::sync::OnceLock;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub media: MediaConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base URL used when resolving public media URLs.
    pub public_url: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub max_age_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Root directory for uploaded image blobs.
    pub root: String,
    pub max_image_size: usize,
}

/// Bootstrap credentials for seeding the first admin user.
/// Both must be set for seeding to happen.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "8750").parse().expect("Invalid PORT"),
                public_url: env_or("PUBLIC_URL", "http://localhost:8750"),
            },
            database: DatabaseConfig {
                path: env_or("DATABASE_PATH", "./data/vitrine.db"),
            },
            session: SessionConfig {
                max_age_seconds: env_or("SESSION_MAX_AGE", "604800")
                    .parse()
                    .unwrap_or(604800), // 7 days
            },
            media: MediaConfig {
                root: env_or("MEDIA_PATH", "./data/media"),
                max_image_size: env_or("MAX_IMAGE_SIZE", "10485760")
                    .parse()
                    .unwrap_or(10 * 1024 * 1024), // 10MB
            },
            admin: AdminConfig {
                email: env::var("ADMIN_EMAIL").ok(),
                password: env::var("ADMIN_PASSWORD").ok(),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
