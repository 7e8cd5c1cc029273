use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, members};
use crate::api::state::AppState;

/// Builds the application router
///
/// Tests drive the same router with an in-memory store.
pub fn build_router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Member search
        .route("/v1/members", get(members::search_member_v1))
        .route("/v2/members", get(members::search_member_v2))
        .route("/v3/members", get(members::search_member_v3))
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        // Shared state
        .with_state(state)
}
