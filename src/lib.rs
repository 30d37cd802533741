pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use state::SharedState;
use tower_http::trace::TraceLayer;

pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/feed", get(handlers::get_feed))
        .route("/posts", get(handlers::get_posts))
        .route("/posts/:id/like", post(handlers::toggle_like))
        .route("/posts/:id/save", post(handlers::toggle_save))
        .route("/stories/:id/seen", post(handlers::mark_story_seen))
        .route("/anchor/:id/visible", post(handlers::report_anchor_visible))
        .layer(TraceLayer::new_for_http())
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}
