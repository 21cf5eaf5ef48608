//! HTTP Basic authentication for the write routes.
//!
//! Credentials are checked before the handler runs. On success the user
//! name is attached to the request as an [`AuthUser`] extension.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};

use crate::services::auth_service::Authenticator;

const REALM: &str = r#"Basic realm="Authorization Required""#;

/// User accepted by [`require_basic_auth`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub String);

pub async fn require_basic_auth(
    State(accounts): State<Arc<dyn Authenticator>>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = credentials.and_then(|TypedHeader(Authorization(basic))| {
        accounts.authenticate(basic.username(), basic.password())
    });

    match user {
        Some(user) => {
            tracing::debug!(user = %user, "basic auth accepted");
            request.extensions_mut().insert(AuthUser(user));
            next.run(request).await
        }
        None => {
            tracing::warn!(path = %request.uri().path(), "basic auth rejected");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, HeaderValue::from_static(REALM))],
    )
        .into_response()
}
