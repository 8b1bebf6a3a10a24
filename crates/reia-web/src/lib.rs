//! REIA Web Server
//!
//! Axum-based web UI for the property investment analyzer: a landing page
//! that submits a listing to the analysis service and a report page that
//! renders the stored snapshot.

pub mod routes;
pub mod state;

use axum::{
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use reia_client::AnalysisClient;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

const STYLESHEET: &str = include_str!("../assets/style.css");
const PLACEHOLDER_SVG: &str = include_str!("../assets/placeholder.svg");

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::landing::index))
        .route("/analyze", post(routes::landing::analyze))
        .route("/report", get(routes::report::report))
        .route("/health", get(health))
        .route("/assets/style.css", get(stylesheet))
        .route("/assets/placeholder.svg", get(placeholder))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], STYLESHEET)
}

async fn placeholder() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], PLACEHOLDER_SVG)
}

/// Run the web server.
pub async fn run_server(client: AnalysisClient, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(client);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web UI listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
