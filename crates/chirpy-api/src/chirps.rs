use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};

use chirpy_store::{ChirpRecord, MAX_CHIRP_LEN};
use chirpy_types::api::{ChirpResponse, CreateChirpRequest};

use crate::censor::censor;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::{AppState, blocking};

fn chirp_response(chirp: ChirpRecord) -> ChirpResponse {
    ChirpResponse {
        id: chirp.id,
        body: chirp.body,
        author_id: chirp.author_id,
    }
}

/// Length is judged on the raw body; the censor runs after, so a body that
/// only fits once masked is still rejected.
pub async fn create_chirp(
    State(state): State<AppState>,
    Extension(AuthUser(author_id)): Extension<AuthUser>,
    Json(req): Json<CreateChirpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.body.chars().count() > MAX_CHIRP_LEN {
        return Err(ApiError::bad_request("chirp is too long"));
    }
    let body = censor(&req.body);

    let st = state.clone();
    let chirp = blocking(move || st.store.create_chirp(&body, author_id)).await?;

    Ok((StatusCode::CREATED, Json(chirp_response(chirp))))
}

pub async fn list_chirps(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChirpResponse>>, ApiError> {
    let st = state.clone();
    let chirps = blocking(move || st.store.list_chirps()).await?;
    Ok(Json(chirps.into_iter().map(chirp_response).collect()))
}

pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> Result<Json<ChirpResponse>, ApiError> {
    let id = parse_chirp_id(&chirp_id)?;
    let st = state.clone();
    let chirp = blocking(move || st.store.get_chirp(id)).await?;
    Ok(Json(chirp_response(chirp)))
}

pub async fn delete_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
    Extension(AuthUser(requester_id)): Extension<AuthUser>,
) -> Result<StatusCode, ApiError> {
    let id = parse_chirp_id(&chirp_id)?;
    let st = state.clone();
    blocking(move || st.store.delete_chirp(id, requester_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A non-numeric id names nothing, so it reads as missing rather than
/// malformed.
fn parse_chirp_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found("invalid chirp id"))
}
