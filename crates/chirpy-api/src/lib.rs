pub mod auth;
pub mod censor;
pub mod chirps;
pub mod error;
pub mod middleware;
pub mod webhooks;

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::{Router, middleware as axum_middleware};
use tracing::error;

use chirpy_auth::TokenService;
use chirpy_store::Store;

use crate::error::ApiError;
use crate::middleware::require_auth;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
    pub tokens: TokenService,
    pub polka_key: String,
}

/// The /api route table. Static files, CORS, and the admin metrics page are
/// wired up by the server binary on top of this.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/healthz", get(healthz))
        .route("/api/users", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/refresh", post(auth::refresh))
        .route("/api/revoke", post(auth::revoke))
        .route("/api/chirps", get(chirps::list_chirps))
        .route("/api/chirps/{chirp_id}", get(chirps::get_chirp))
        .route("/api/polka/webhooks", post(webhooks::polka_upgrade))
        .with_state(state.clone());

    let protected = Router::new()
        .route("/api/users", put(auth::update_user))
        .route("/api/chirps", post(chirps::create_chirp))
        .route("/api/chirps/{chirp_id}", delete(chirps::delete_chirp))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
        .with_state(state);

    public.merge(protected)
}

async fn healthz() -> &'static str {
    "OK"
}

/// Store operations block on the exclusive lock and the disk sync, so they
/// run off the async runtime.
pub(crate) async fn blocking<T, E, F>(op: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::internal()
        })?
        .map_err(Into::into)
}
