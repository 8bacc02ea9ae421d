use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use tracing::info;

use chirpy_types::api::UpgradeWebhookRequest;

use crate::error::ApiError;
use crate::{AppState, blocking};

const UPGRADE_EVENT: &str = "user.upgraded";

/// Payment-provider callback. Authenticated with a shared API key in
/// `Authorization: ApiKey <key>` rather than a session token.
pub async fn polka_upgrade(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpgradeWebhookRequest>,
) -> Result<StatusCode, ApiError> {
    let key = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("ApiKey "))
        .ok_or_else(|| ApiError::unauthorized("invalid api key"))?;
    if key != state.polka_key {
        return Err(ApiError::unauthorized("invalid api key"));
    }

    if req.event != UPGRADE_EVENT {
        // Acknowledge events we don't handle so the provider stops
        // retrying them.
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = req.data.user_id;
    let st = state.clone();
    blocking(move || st.store.upgrade_to_chirpy_red(user_id)).await?;
    info!(user_id, "user upgraded to chirpy red");

    Ok(StatusCode::NO_CONTENT)
}
