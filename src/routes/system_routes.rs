use axum::{routing::get, Router};

pub fn routes() -> Router {
    Router::new().route("/ping", get(ping))
}

/// GET /ping
async fn ping() -> &'static str {
    "pong"
}
