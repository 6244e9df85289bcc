use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockkeep_core::ValidationError;
use stockkeep_infra::RepositoryError;

pub fn validation_error_to_response(err: ValidationError) -> axum::response::Response {
    tracing::error!(reason = err.reason(), field = err.field().unwrap_or("-"), "{err}");
    json_error(StatusCode::BAD_REQUEST, err.to_string())
}

pub fn repository_error_to_response(err: RepositoryError) -> axum::response::Response {
    tracing::error!(error = %err, "repository failure");
    match err {
        RepositoryError::MissingId => json_error(StatusCode::BAD_REQUEST, err.to_string()),
        RepositoryError::NotFound(_) => json_error(StatusCode::NOT_FOUND, err.to_string()),
        RepositoryError::Corrupt(_) | RepositoryError::Storage(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

pub fn not_found(message: impl Into<String>) -> axum::response::Response {
    let message = message.into();
    tracing::error!("{message}");
    json_error(StatusCode::NOT_FOUND, message)
}

/// Uniform error body: `{"status_code", "error", "message"}`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "status_code": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockkeep_core::InventoryItemId;

    #[test]
    fn validation_errors_are_bad_requests() {
        let resp = validation_error_to_response(ValidationError::missing("sku"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn repository_errors_map_by_kind() {
        let not_found =
            repository_error_to_response(RepositoryError::NotFound(InventoryItemId::new(1)));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let storage = repository_error_to_response(RepositoryError::Storage("down".into()));
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let missing = repository_error_to_response(RepositoryError::MissingId);
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    }
}
