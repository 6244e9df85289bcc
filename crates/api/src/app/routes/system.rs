use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::app::{dto, errors};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Service descriptor: name, version and the collection path.
pub async fn index() -> impl IntoResponse {
    Json(dto::index_json())
}

/// Known path, unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    tracing::error!(%method, path = %uri.path(), "method not allowed");
    errors::json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("{method} is not allowed on {}", uri.path()),
    )
}

/// No route matches the path.
pub async fn route_not_found(uri: Uri) -> Response {
    errors::not_found(format!("{} was not found on this server.", uri.path()))
}
