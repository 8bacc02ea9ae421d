use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use chirpy_auth::AuthError;
use chirpy_store::StoreError;
use chirpy_types::api::ErrorResponse;

/// A domain failure translated to a status code plus the uniform
/// `{"error": ...}` body every endpoint returns on failure.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Internal failures get a deliberately vague message; the detail goes
    /// to the log, not the client.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "something went wrong")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match &err {
            StoreError::EmailTaken => StatusCode::CONFLICT,
            StoreError::BadCredentials | StoreError::UnknownAccount => StatusCode::UNAUTHORIZED,
            StoreError::UserNotFound | StoreError::ChirpNotFound => StatusCode::NOT_FOUND,
            StoreError::ChirpTooLong => StatusCode::BAD_REQUEST,
            StoreError::NotAuthor => StatusCode::FORBIDDEN,
            StoreError::Hash(_)
            | StoreError::Corrupt(_)
            | StoreError::Encode(_)
            | StoreError::Io(_)
            | StoreError::LockPoisoned => {
                error!("store failure: {}", err);
                return Self::internal();
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::InvalidToken | AuthError::RevokedToken => {
                Self::unauthorized(err.to_string())
            }
            AuthError::Hash(_) | AuthError::Sign(_) => {
                error!("auth failure: {}", err);
                Self::internal()
            }
        }
    }
}
