//! Local-filesystem image blob store.
//!
//! Keys look like `projects/{token}-{millis}.{ext}`: a random base36
//! token plus the upload timestamp, so two uploads of the same
//! filename never collide. Writes refuse to overwrite an existing key;
//! a key names immutable content and the URL handed back after upload
//! must stay durable (documents embed it without back-references).

use std::path::{Path, PathBuf};

use rand::Rng;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::{Error, Result};

/// Cache directive applied when serving blobs. Content under a key
/// never changes, so an hour of caching is safe.
pub const CACHE_CONTROL: &str = "public, max-age=3600";

const KEY_PREFIX: &str = "projects";
const TOKEN_LEN: usize = 13;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Filesystem-backed blob store for uploaded images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    public_base: String,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    /// Generate a fresh storage key for a filename. The extension is
    /// carried over (lowercased); everything else is replaced by a
    /// random token and timestamp.
    pub fn generate_key(filename: &str) -> String {
        let token = base36_token(TOKEN_LEN);
        let millis = chrono::Utc::now().timestamp_millis();

        match file_extension(filename) {
            Some(ext) => format!("{}/{}-{}.{}", KEY_PREFIX, token, millis, ext),
            None => format!("{}/{}-{}", KEY_PREFIX, token, millis),
        }
    }

    /// Write bytes under an explicit key. Fails if the key already
    /// exists; keys are never overwritten.
    pub async fn store(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.blob_path(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    Error::Upload(format!("Key already exists: {}", key))
                } else {
                    Error::Upload(format!("Failed to write {}: {}", key, e))
                }
            })?;

        file.write_all(data)
            .await
            .map_err(|e| Error::Upload(format!("Failed to write {}: {}", key, e)))?;
        file.flush()
            .await
            .map_err(|e| Error::Upload(format!("Failed to flush {}: {}", key, e)))?;

        debug!("Stored blob {} ({} bytes)", key, data.len());

        Ok(())
    }

    /// Upload a file: generate a key, store the bytes, return the
    /// key and its public URL. The URL is only handed out once the
    /// bytes are on disk.
    pub async fn upload(&self, filename: &str, data: &[u8]) -> Result<(String, String)> {
        let key = Self::generate_key(filename);
        self.store(&key, data).await?;
        Ok((self.public_url(&key), key))
    }

    /// Public URL for a stored key.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/media/{}", self.public_base.trim_end_matches('/'), key)
    }

    /// Read a blob back. Missing keys and keys that escape the store
    /// root both surface as FileNotFound.
    pub async fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.blob_path(key)?;
        tokio::fs::read(&path)
            .await
            .map_err(|_| Error::FileNotFound(key.to_string()))
    }

    /// Resolve a key to a path inside the store root, rejecting
    /// traversal components.
    fn blob_path(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let escapes = relative.components().any(|c| {
            !matches!(c, std::path::Component::Normal(_))
        });
        if key.is_empty() || escapes {
            return Err(Error::FileNotFound(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

fn base36_token(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
