//! Services for Vitrine.
//!
//! Password hashing, image blob storage, and startup bootstrap.

mod bootstrap;
mod image_store;
mod password;

pub use bootstrap::bootstrap_admin;
pub use image_store::{ImageStore, CACHE_CONTROL};
pub use password::{hash_password, verify_password};
