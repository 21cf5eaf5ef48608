use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::routes::{admin_routes, system_routes, transfer_routes, user_routes};
use crate::state::app::AppState;

/// Build the complete Axum application:
/// - GET  /ping         (liveness)
/// - GET  /user/:name   (value lookup)
/// - POST /transfer     (X-Timestamp skew check)
/// - POST /admin        (basic auth, store a value)
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(system_routes::routes())
        .merge(user_routes::routes(state.store.clone()))
        .merge(transfer_routes::routes(state.skew.clone()))
        .merge(admin_routes::routes(state.store.clone(), state.accounts.clone()))

        // Panics in a handler become a 500 for that request only
        .layer(CatchPanicLayer::new())

        // Logging middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
