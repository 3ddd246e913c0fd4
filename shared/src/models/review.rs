//! Review Model

use serde::{Deserialize, Serialize};

/// Review entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    /// User name snapshot
    pub user_name: String,
    /// 1-5
    pub rating: i64,
    pub comment: String,
    pub approved: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create review payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

/// Update review payload (same shape as create, both fields optional)
pub type ReviewUpdate = ReviewCreate;

/// Approve / reject payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewApproval {
    pub approved: bool,
}
