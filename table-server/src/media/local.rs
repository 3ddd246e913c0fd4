//! Local filesystem image store

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{ImageStore, is_valid_public_id};
use crate::utils::{AppError, AppResult, ErrorCode};

/// URL prefix served by `GET /uploads/{file}`
pub const LOCAL_URL_PREFIX: &str = "/uploads";

pub struct LocalImageStore {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalImageStore {
    /// Creates `dir` if missing
    pub fn new(dir: impl AsRef<Path>, public_base_url: Option<String>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| {
            AppError::with_message(
                ErrorCode::FileStorageFailed,
                format!("Failed to create image directory {}: {e}", dir.display()),
            )
        })?;
        let public_base_url = public_base_url
            .unwrap_or_else(|| LOCAL_URL_PREFIX.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            dir,
            public_base_url,
        })
    }

    fn path_for(&self, public_id: &str) -> PathBuf {
        self.dir.join(format!("{public_id}.jpg"))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn put(&self, public_id: &str, jpeg: Vec<u8>) -> AppResult<String> {
        if !is_valid_public_id(public_id) {
            return Err(AppError::invalid_request("Invalid image id"));
        }
        tokio::fs::write(self.path_for(public_id), jpeg)
            .await
            .map_err(|e| {
                tracing::error!(public_id, error = %e, "Local image write failed");
                AppError::new(ErrorCode::FileStorageFailed)
            })?;
        Ok(format!("{}/{public_id}.jpg", self.public_base_url))
    }

    async fn delete(&self, public_id: &str) -> AppResult<()> {
        if !is_valid_public_id(public_id) {
            return Err(AppError::invalid_request("Invalid image id"));
        }
        match tokio::fs::remove_file(self.path_for(public_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::new(ErrorCode::ImageNotFound))
            }
            Err(e) => {
                tracing::error!(public_id, error = %e, "Local image delete failed");
                Err(AppError::new(ErrorCode::FileStorageFailed))
            }
        }
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{process_upload, sample_png};

    #[tokio::test]
    async fn test_put_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path(), None).unwrap();
        let processed = process_upload(&sample_png(), "a.png").unwrap();

        let url = store
            .put(&processed.public_id, processed.jpeg.clone())
            .await
            .unwrap();
        assert_eq!(url, format!("/uploads/{}.jpg", processed.public_id));
        assert!(dir.path().join(format!("{}.jpg", processed.public_id)).exists());

        store.delete(&processed.public_id).await.unwrap();
        let err = store.delete(&processed.public_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ImageNotFound);
    }

    #[tokio::test]
    async fn test_rejects_bad_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path(), Some("https://cdn.example.com/".into())).unwrap();
        assert!(store.put("../escape", vec![1]).await.is_err());
        assert!(store.delete("../escape").await.is_err());
    }
}
