use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::archive_root))
        .route("/page/:page", get(handlers::archive_page))
        .route("/issues/:slug", get(handlers::issue_page))
        .route("/api/summarize", post(handlers::summarize))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
