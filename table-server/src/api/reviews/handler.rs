//! Review handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Review, ReviewApproval, ReviewCreate, ReviewUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, review, user};
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

const MIN_RATING: i64 = 1;
const MAX_RATING: i64 = 5;

/// GET /api/reviews - newest approved reviews
pub async fn list_approved(State(state): State<ServerState>) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(review::find_approved(&state.pool).await?))
}

/// GET /api/reviews/my-reviews
pub async fn list_mine(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(review::find_by_user(&state.pool, current_user.id).await?))
}

/// GET /api/reviews/all
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(review::find_all(&state.pool).await?))
}

/// POST /api/reviews - starts unapproved
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let rating = payload
        .rating
        .ok_or_else(|| AppError::new(ErrorCode::RequiredField).with_detail("field", "rating"))?;
    check_rating(rating)?;
    let comment = payload
        .comment
        .ok_or_else(|| AppError::new(ErrorCode::RequiredField).with_detail("field", "comment"))?;
    validate_required_text(&comment, "comment", MAX_NOTE_LEN)?;

    // Name snapshot comes from the account, not the token
    let author = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let created = review::create(&state.pool, author.id, &author.name, rating, comment.trim()).await?;
    tracing::info!(review_id = created.id, user_id = author.id, rating, "Review submitted");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/reviews/:id - owner only, back to moderation
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReviewUpdate>,
) -> AppResult<Json<Review>> {
    if let Some(rating) = payload.rating {
        check_rating(rating)?;
    }
    if let Some(comment) = &payload.comment {
        validate_required_text(comment, "comment", MAX_NOTE_LEN)?;
    }

    let existing = load(&state, id).await?;
    if existing.user_id != current_user.id {
        return Err(AppError::forbidden("Not authorized to edit this review"));
    }

    let comment = payload.comment.map(|c| c.trim().to_string());
    let updated = review::update(&state.pool, id, payload.rating, comment)
        .await
        .map_err(|e| map_not_found(e, id))?;
    Ok(Json(updated))
}

/// DELETE /api/reviews/:id - owner or admin
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let existing = load(&state, id).await?;
    if !current_user.can_access(existing.user_id) {
        return Err(AppError::forbidden("Not authorized to delete this review"));
    }
    review::delete(&state.pool, id)
        .await
        .map_err(|e| map_not_found(e, id))?;
    tracing::info!(review_id = id, by_admin = current_user.is_admin(), "Review deleted");
    Ok(Json(true))
}

/// PUT /api/reviews/:id/approve - approve or reject
pub async fn set_approval(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReviewApproval>,
) -> AppResult<Json<Review>> {
    let updated = review::set_approved(&state.pool, id, payload.approved)
        .await
        .map_err(|e| map_not_found(e, id))?;
    tracing::info!(review_id = id, approved = payload.approved, "Review moderated");
    Ok(Json(updated))
}

fn check_rating(rating: i64) -> AppResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::new(ErrorCode::ReviewRatingOutOfRange).with_detail("rating", rating));
    }
    Ok(())
}

async fn load(state: &ServerState, id: i64) -> AppResult<Review> {
    review::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReviewNotFound).with_detail("id", id))
}

fn map_not_found(err: RepoError, id: i64) -> AppError {
    match err {
        RepoError::NotFound(_) => AppError::new(ErrorCode::ReviewNotFound).with_detail("id", id),
        other => other.into(),
    }
}
