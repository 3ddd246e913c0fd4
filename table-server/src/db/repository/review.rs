//! Review Repository

use super::{RepoError, RepoResult};
use shared::models::Review;
use sqlx::SqlitePool;

/// Public listing size
pub const PUBLIC_REVIEW_LIMIT: i64 = 20;

/// Newest approved reviews
pub async fn find_approved(pool: &SqlitePool) -> RepoResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT id, user_id, user_name, rating, comment, approved, created_at, updated_at FROM review WHERE approved = 1 ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(PUBLIC_REVIEW_LIMIT)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT id, user_id, user_name, rating, comment, approved, created_at, updated_at FROM review WHERE user_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT id, user_id, user_name, rating, comment, approved, created_at, updated_at FROM review ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Review>> {
    let review = sqlx::query_as::<_, Review>(
        "SELECT id, user_id, user_name, rating, comment, approved, created_at, updated_at FROM review WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(review)
}

/// New reviews always start unapproved
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    user_name: &str,
    rating: i64,
    comment: &str,
) -> RepoResult<Review> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO review (id, user_id, user_name, rating, comment, approved, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?6)",
    )
    .bind(id)
    .bind(user_id)
    .bind(user_name)
    .bind(rating)
    .bind(comment)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create review".into()))
}

/// Edit content; sends the review back to moderation
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    rating: Option<i64>,
    comment: Option<String>,
) -> RepoResult<Review> {
    let rows = sqlx::query(
        "UPDATE review SET rating = COALESCE(?1, rating), comment = COALESCE(?2, comment), approved = 0, updated_at = ?3 WHERE id = ?4",
    )
    .bind(rating)
    .bind(comment)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Review {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Review {id} not found")))
}

pub async fn set_approved(pool: &SqlitePool, id: i64, approved: bool) -> RepoResult<Review> {
    let rows = sqlx::query("UPDATE review SET approved = ?, updated_at = ? WHERE id = ?")
        .bind(approved)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Review {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Review {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM review WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Review {id} not found")));
    }
    Ok(())
}
