pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod pages;
pub mod state;

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use config::ServerConfig;
use state::AppState;

/// Build the Axum router and application state from a config.
pub fn build_app(config: ServerConfig) -> (Router<()>, AppState) {
    let state = AppState::new(config);
    (router(state.clone()), state)
}

/// Build the router for an already constructed state.
pub fn router(state: AppState) -> Router<()> {
    let web_root = state.config.web_root.clone();
    let timeout = Duration::from_secs(state.config.limits.request_timeout_secs);

    let api_routes = Router::new()
        .route("/games", get(api::list_games))
        .route("/games/{game_id}", get(api::get_game));

    // Thumbnails, engine builds and the client package; anything else gets
    // the HTML not-found page.
    let static_files = ServeDir::new(&web_root)
        .not_found_service(get(pages::not_found).with_state::<()>(state.clone()));

    Router::new()
        .route("/", get(pages::home))
        .route("/games/{game_id}", get(pages::game))
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .fallback_service(static_files)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}
