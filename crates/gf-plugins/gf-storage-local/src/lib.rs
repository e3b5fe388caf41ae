//! # gf-storage-local
//! gavelflow/crates/gf-storage-local/src/lib.rs
//! Local filesystem implementation of `MediaStore`.
//! Content-addressable: files are named by their SHA-256 hash and sharded
//! two levels deep, which deduplicates repeat uploads for free.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;

use gf_core::traits::MediaStore;

pub struct LocalMediaStore {
    /// Root directory for all uploads (e.g. "./data/uploads").
    root_path: PathBuf,
    /// Public URL prefix the router serves the same tree under
    /// (e.g. "/static/uploads").
    url_prefix: String,
}

impl LocalMediaStore {
    pub fn new(root: PathBuf, url_prefix: String) -> Self {
        Self {
            root_path: root,
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Shard directory for a hash: "ab/cd".
    fn shard(hash: &str) -> String {
        format!("{}/{}", &hash[0..2], &hash[2..4])
    }

    /// The original filename's extension, kept so the static file server can
    /// infer a content type. Anything non-alphanumeric is discarded.
    fn sanitized_extension(original_name: &str) -> String {
        Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty() && e.len() <= 8)
            .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default()
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn save_upload(&self, bytes: Vec<u8>, original_name: &str) -> anyhow::Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = hex::encode(hasher.finalize());

        let file_name = format!("{}{}", hash, Self::sanitized_extension(original_name));
        let shard = Self::shard(&hash);

        let dir = self.root_path.join(&shard);
        fs::create_dir_all(&dir).await?;

        let target = dir.join(&file_name);
        if !target.exists() {
            fs::write(&target, &bytes).await?;
        }

        Ok(format!("{}/{}/{}", self.url_prefix, shard, file_name))
    }
}
