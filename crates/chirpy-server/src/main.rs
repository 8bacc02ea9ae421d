use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use chirpy_api::{AppState, AppStateInner};
use chirpy_auth::TokenService;
use chirpy_store::Store;

/// Fileserver hit count, shown on the admin metrics page.
type HitCounter = Arc<AtomicU64>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy=debug,tower_http=debug".into()),
        )
        .init();

    // Config. The signing secret has no default; refusing to start beats
    // silently signing tokens with a guessable value.
    let jwt_secret =
        std::env::var("CHIRPY_JWT_SECRET").context("CHIRPY_JWT_SECRET must be set")?;
    let polka_key = std::env::var("CHIRPY_POLKA_KEY").unwrap_or_default();
    let db_path = PathBuf::from(
        std::env::var("CHIRPY_DB_PATH").unwrap_or_else(|_| "database.json".into()),
    );
    let asset_dir = std::env::var("CHIRPY_ASSET_DIR").unwrap_or_else(|_| "./server".into());
    let host = std::env::var("CHIRPY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("CHIRPY_PORT")
        .unwrap_or_else(|_| "8080".into())
        .parse()?;

    // Debug runs start from a clean slate.
    if matches!(std::env::var("CHIRPY_DEBUG").as_deref(), Ok("1")) {
        match std::fs::remove_file(&db_path) {
            Ok(()) => info!("debug: removed {}", db_path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).context("removing state file"),
        }
    }

    // A corrupt state file is fatal here, no partial start.
    let store = Store::open(db_path)?;

    let state: AppState = Arc::new(AppStateInner {
        store,
        tokens: TokenService::new(&jwt_secret),
        polka_key,
    });

    let hits: HitCounter = Arc::new(AtomicU64::new(0));

    let admin = Router::new()
        .route("/admin/metrics", get(metrics))
        .route("/api/reset", post(reset_metrics))
        .with_state(hits.clone());

    let site = Router::new()
        .nest_service("/app", ServeDir::new(&asset_dir))
        .layer(middleware::from_fn_with_state(hits, count_hit));

    let app = chirpy_api::router(state)
        .merge(admin)
        .merge(site)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Chirpy listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn count_hit(State(hits): State<HitCounter>, req: Request, next: Next) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::Relaxed);
    next.run(req).await
}

async fn metrics(State(hits): State<HitCounter>) -> Html<String> {
    let count = hits.load(Ordering::Relaxed);
    Html(format!(
        "<html><body><h1>Welcome, Chirpy Admin</h1>\
         <p>Chirpy has been visited {count} times!</p></body></html>"
    ))
}

async fn reset_metrics(State(hits): State<HitCounter>) -> StatusCode {
    hits.store(0, Ordering::Relaxed);
    StatusCode::OK
}
