//! Image upload response

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub url: String,
    /// SHA-256 hex digest of the stored JPEG
    pub public_id: String,
}
