use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::post,
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::middleware::basic_auth::{require_basic_auth, AuthUser};
use crate::services::auth_service::Authenticator;
use crate::services::kv_service;
use crate::state::kv::UserStore;

/// Body of `POST /admin`. `value` is required and must not be empty.
#[derive(Debug, Deserialize)]
pub struct SetValueRequest {
    pub value: String,
}

/// Routes that require basic auth. Rejected credentials never reach the
/// handlers.
pub fn routes(store: UserStore, accounts: Arc<dyn Authenticator>) -> Router {
    Router::new()
        .route("/admin", post(set_value))
        .with_state(store)
        .route_layer(middleware::from_fn_with_state(accounts, require_basic_auth))
}

//
// ─────────────────────────────────────────────────────────────
// POST /admin
// Store `value` under the authenticated user.
// A body that does not bind gets a bare 400 with no body.
// ─────────────────────────────────────────────────────────────
//
async fn set_value(
    State(store): State<UserStore>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    payload: Result<Json<SetValueRequest>, JsonRejection>,
) -> Response
{
    let value = match payload {
        Ok(Json(SetValueRequest { value })) if !value.is_empty() => value,
        Ok(_) => {
            tracing::warn!(user = %user, "bind failed: value is empty");
            return StatusCode::BAD_REQUEST.into_response();
        }
        Err(rejection) => {
            tracing::warn!(user = %user, error = %rejection.body_text(), "bind failed");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    kv_service::set(&store, user, value);

    Json(json!({ "status": "ok" })).into_response()
}
