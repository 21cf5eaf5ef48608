use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::Uri,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::services::kv_service;
use crate::state::kv::UserStore;

const PREFIX: &str = "/user/";

pub fn routes(store: UserStore) -> Router {
    Router::new()
        .route("/user/:name", get(get_user))
        .with_state(store)
}

//
// ─────────────────────────────────────────────────────────────
// GET /user/{name}
// Always 200; a miss is reported in the body, not the status
// ─────────────────────────────────────────────────────────────
//
async fn get_user(
    name: Result<Path<String>, PathRejection>,
    uri: Uri,
    State(store): State<UserStore>,
) -> Json<Value>
{
    let user = match name {
        Ok(Path(user)) => user,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "decoding user name lossily");
            lossy_name(uri.path())
        }
    };

    match kv_service::get(&store, &user) {
        Some(value) => Json(json!({ "user": user, "value": value })),
        None => Json(json!({ "user": user, "status": "no value" })),
    }
}

/// Percent-decode the name segment, replacing invalid UTF-8 with U+FFFD.
fn lossy_name(path: &str) -> String {
    let raw = path.strip_prefix(PREFIX).unwrap_or(path).as_bytes();
    let mut bytes = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let decoded = match (raw[i], raw.get(i + 1..i + 3)) {
            (b'%', Some(&[hi, lo])) => hex_value(hi).zip(hex_value(lo)).map(|(h, l)| h << 4 | l),
            _ => None,
        };

        match decoded {
            Some(byte) => {
                bytes.push(byte);
                i += 3;
            }
            None => {
                bytes.push(raw[i]);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|v| v as u8)
}
