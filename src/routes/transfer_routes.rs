use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use crate::errors::TransferError;
use crate::services::skew_service::SkewValidator;

pub const X_TIMESTAMP: &str = "x-timestamp";

pub fn routes(validator: SkewValidator) -> Router {
    Router::new()
        .route("/transfer", post(transfer))
        .with_state(validator)
}

//
// ─────────────────────────────────────────────────────────────
// POST /transfer
// Accepts only when X-Timestamp is close enough to server time.
// Nothing is moved; the decision is the whole effect.
// ─────────────────────────────────────────────────────────────
//
async fn transfer(
    State(validator): State<SkewValidator>,
    headers: HeaderMap,
) -> Result<Json<Value>, TransferError>
{
    let raw = match headers.get(X_TIMESTAMP) {
        Some(value) => Some(value.to_str().map_err(|_| TransferError::InvalidTimestamp)?),
        None => None,
    };

    validator.check(raw)?;

    Ok(Json(json!({ "status": "transfer successful" })))
}
