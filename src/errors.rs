use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Why a transfer was refused. The `Display` text is the `error` field of
/// the 400 body.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransferError {
    #[error("X-Timestamp header is required")]
    MissingTimestamp,

    #[error("Invalid X-Timestamp header")]
    InvalidTimestamp,

    #[error("Transfer rejected")]
    Rejected,
}

impl IntoResponse for TransferError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string() });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config.json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Fatal startup errors surfaced by `main`.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to install tracing subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn transfer_errors_are_bad_requests_with_message() {
        for (err, message) in [
            (TransferError::MissingTimestamp, "X-Timestamp header is required"),
            (TransferError::InvalidTimestamp, "Invalid X-Timestamp header"),
            (TransferError::Rejected, "Transfer rejected"),
        ] {
            let response = err.into_response();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(response_json(response).await, json!({ "error": message }));
        }
    }
}
