use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::AppState;
use crate::error::ApiError;

/// The authenticated caller, inserted into request extensions by
/// `require_auth`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub u64);

/// Validate the Bearer access token and stash the caller's user id for the
/// handler. Refresh tokens do not pass here; wrong issuer.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;
    let user_id = state.tokens.validate_access(token)?;
    req.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(req).await)
}

/// Pull the raw token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("please provide a valid token"))
}
