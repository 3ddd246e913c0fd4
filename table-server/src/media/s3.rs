//! S3 image store
//!
//! Objects live at `s3://{bucket}/images/menu/{public_id}.jpg`.

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;

use super::{ImageStore, is_valid_public_id};
use crate::utils::{AppError, AppResult, ErrorCode};

fn s3_image_key(public_id: &str) -> String {
    format!("images/menu/{public_id}.jpg")
}

pub struct S3ImageStore {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl S3ImageStore {
    /// Client from the default AWS credential / region chain
    pub async fn from_env(bucket: String, public_base_url: Option<String>) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = S3Client::new(&aws_config);
        let public_base_url = public_base_url
            .unwrap_or_else(|| format!("https://{bucket}.s3.amazonaws.com"))
            .trim_end_matches('/')
            .to_string();
        Self {
            client,
            bucket,
            public_base_url,
        }
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put(&self, public_id: &str, jpeg: Vec<u8>) -> AppResult<String> {
        if !is_valid_public_id(public_id) {
            return Err(AppError::invalid_request("Invalid image id"));
        }
        let key = s3_image_key(public_id);

        // Idempotent: same content hash, same key
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(jpeg.into())
            .content_type("image/jpeg")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(public_id, error = %e, "S3 upload failed");
                AppError::with_message(ErrorCode::FileStorageFailed, "Image upload failed")
            })?;

        Ok(format!("{}/{key}", self.public_base_url))
    }

    async fn delete(&self, public_id: &str) -> AppResult<()> {
        if !is_valid_public_id(public_id) {
            return Err(AppError::invalid_request("Invalid image id"));
        }
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(s3_image_key(public_id))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(public_id, error = %e, "S3 delete failed");
                AppError::with_message(ErrorCode::FileStorageFailed, "Image delete failed")
            })?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "s3"
    }
}
