//! Menu images
//!
//! Uploads are validated, re-encoded as JPEG and addressed by the SHA-256
//! of the encoded bytes (`public_id`). Storage goes through [`ImageStore`]:
//! S3 when a bucket is configured, the local filesystem otherwise.

pub mod local;
pub mod s3;

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use sha2::{Digest, Sha256};

use crate::core::ImageConfig;
use crate::utils::{AppError, AppResult, ErrorCode};

pub use local::LocalImageStore;
pub use s3::S3ImageStore;

/// Maximum upload size (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// JPEG re-encode quality
const JPEG_QUALITY: u8 = 85;

/// Accepted upload extensions
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Storage backend for processed images
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store a JPEG under `public_id`, returning its public URL
    async fn put(&self, public_id: &str, jpeg: Vec<u8>) -> AppResult<String>;

    /// Remove a stored image
    async fn delete(&self, public_id: &str) -> AppResult<()>;

    /// Backend name for logs
    fn backend(&self) -> &'static str;
}

/// Build the configured store
pub async fn build_store(config: &ImageConfig) -> AppResult<Arc<dyn ImageStore>> {
    match &config.s3_bucket {
        Some(bucket) => {
            let store = S3ImageStore::from_env(bucket.clone(), config.public_base_url.clone()).await;
            tracing::info!(bucket = %bucket, "Image storage: S3");
            Ok(Arc::new(store))
        }
        None => {
            let store = LocalImageStore::new(&config.local_dir, config.public_base_url.clone())?;
            tracing::info!(dir = %config.local_dir, "Image storage: local filesystem");
            Ok(Arc::new(store))
        }
    }
}

/// A validated, re-encoded upload
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub public_id: String,
    pub jpeg: Vec<u8>,
}

/// Validate an upload and re-encode it as JPEG
pub fn process_upload(data: &[u8], filename: &str) -> AppResult<ProcessedImage> {
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!("File too large: {} bytes (max {})", data.len(), MAX_FILE_SIZE),
        ));
    }

    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!("Unsupported format: {ext}. Supported: png, jpg, jpeg, webp"),
        ));
    }

    let img = image::load_from_memory(data).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image: {e}"))
    })?;

    let mut jpeg = Vec::new();
    {
        let mut cursor = Cursor::new(&mut jpeg);
        let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        img.to_rgb8().write_with_encoder(encoder).map_err(|e| {
            AppError::with_message(
                ErrorCode::ImageProcessingFailed,
                format!("Image compression failed: {e}"),
            )
        })?;
    }

    let mut hasher = Sha256::new();
    hasher.update(&jpeg);
    let public_id = hex::encode(hasher.finalize());

    Ok(ProcessedImage { public_id, jpeg })
}

/// `public_id` must be a SHA-256 hex digest (guards paths and keys)
pub fn is_valid_public_id(public_id: &str) -> bool {
    public_id.len() == 64 && public_id.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
pub(crate) fn sample_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 30, 30]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
