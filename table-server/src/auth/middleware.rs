//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::extractor::authenticate;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Resources whose GET collection and `/{id}` reads are public
const PUBLIC_READ_PREFIXES: [&str; 3] = ["/api/menu", "/api/combos", "/api/special-offers"];

/// Whether a request may pass without a token
///
/// Public reads are `GET <prefix>` and `GET <prefix>/{id}`, plus the
/// approved review list. `/all` listings stay behind authentication.
pub fn is_public_route(method: &http::Method, path: &str) -> bool {
    if path == "/api/auth/login" || path == "/api/auth/register" {
        return true;
    }
    if method != http::Method::GET {
        return false;
    }
    if path == "/api/reviews" {
        return true;
    }
    PUBLIC_READ_PREFIXES.iter().any(|prefix| {
        match path.strip_prefix(prefix) {
            Some("") => true,
            Some(rest) => rest
                .strip_prefix('/')
                .is_some_and(|id| !id.is_empty() && id != "all" && !id.contains('/')),
            None => false,
        }
    })
}

/// Require a logged-in user
///
/// Reads `Authorization: Bearer <token>`, validates it and inserts
/// [`CurrentUser`] into the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non `/api/` paths (health, uploads)
/// - [`is_public_route`] matches
///
/// # Errors
///
/// | Error | Status |
/// |-------|--------|
/// | no Authorization header | 401 NotAuthenticated |
/// | expired token | 401 TokenExpired |
/// | invalid token | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || is_public_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::not_authenticated());
        }
    };

    let user = authenticate(state.get_jwt_service(), token, req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Require the admin role
///
/// Must run after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::not_authenticated)?;

    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id,
            user_name = user.name.clone(),
            uri = format!("{:?}", req.uri())
        );
        return Err(AppError::admin_required());
    }

    Ok(next.run(req).await)
}
