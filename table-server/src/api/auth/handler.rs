//! Authentication handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{AuthResponse, LoginRequest, RegisterRequest, Role, User};

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/auth/register - create a customer account
///
/// Always creates role `user`; admins come from the seed command.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort).with_detail("min", MIN_PASSWORD_LEN));
    }
    if req.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation("Password is too long").with_detail("field", "password"));
    }
    if let Some(table) = req.table_number
        && table < 1
    {
        return Err(AppError::validation("table_number must be a positive number")
            .with_detail("field", "table_number"));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let created = user::create(
        &state.pool,
        &req.name,
        &req.email,
        &password_hash,
        Role::User,
        req.table_number,
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailExists),
        other => other.into(),
    })?;

    let token = issue_token(&state, &created)?;
    tracing::info!(user_id = created.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: created,
        }),
    ))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same error.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let found = user::find_by_email(&state.pool, &req.email).await?;

    let account = match found {
        Some(u) if verify_password(&req.password, &u.password_hash) => u,
        Some(u) => {
            security_log!("WARN", "login_failed", user_id = u.id, reason = "invalid_password");
            return Err(AppError::invalid_credentials());
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                email = req.email.clone(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let token = issue_token(&state, &account)?;
    tracing::info!(user_id = account.id, role = account.role.as_str(), "User logged in");

    Ok(Json(AuthResponse {
        token,
        user: account,
    }))
}

/// GET /api/auth/me
pub async fn me(State(state): State<ServerState>, current_user: CurrentUser) -> AppResult<Json<User>> {
    let account = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(account))
}

fn issue_token(state: &ServerState, account: &User) -> AppResult<String> {
    state
        .get_jwt_service()
        .generate_token(account)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))
}
