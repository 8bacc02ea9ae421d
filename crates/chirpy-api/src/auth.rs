use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, extract::State};

use chirpy_store::UserRecord;
use chirpy_types::api::{
    CreateUserRequest, LoginRequest, LoginResponse, RefreshResponse, UpdateUserRequest,
    UserResponse,
};

use crate::error::ApiError;
use crate::middleware::{AuthUser, bearer_token};
use crate::{AppState, blocking};

fn user_response(user: UserRecord) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        is_chirpy_red: user.is_chirpy_red,
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("both email and password are required"));
    }

    let st = state.clone();
    let user = blocking(move || st.store.create_user(&req.email, &req.password)).await?;

    Ok((StatusCode::CREATED, Json(user_response(user))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("both email and password are required"));
    }

    let st = state.clone();
    let user = blocking(move || st.store.authenticate(&req.email, &req.password)).await?;

    let token = state.tokens.issue_access(user.id)?;
    let refresh_token = state.tokens.issue_refresh(user.id)?;

    Ok(Json(LoginResponse {
        id: user.id,
        email: user.email,
        is_chirpy_red: user.is_chirpy_red,
        token,
        refresh_token,
    }))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("both email and password are required"));
    }

    let st = state.clone();
    let user =
        blocking(move || st.store.update_user(user_id, &req.email, &req.password)).await?;

    Ok(Json(user_response(user)))
}

/// Trade a refresh token for a fresh access token. The refresh token rides
/// in the Authorization header, not the body.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, ApiError> {
    let token = bearer_token(&headers)?.to_string();

    let st = state.clone();
    let access = blocking(move || -> Result<String, ApiError> {
        let user_id = st.tokens.validate_refresh(&token, &st.store)?;
        Ok(st.tokens.issue_access(user_id)?)
    })
    .await?;

    Ok(Json(RefreshResponse { token: access }))
}

/// Invalidate a refresh token. The token must still be a valid, unrevoked
/// refresh token to be revocable at all.
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers)?.to_string();

    let st = state.clone();
    blocking(move || -> Result<(), ApiError> {
        st.tokens.validate_refresh(&token, &st.store)?;
        st.store.revoke_token(&token)?;
        Ok(())
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
