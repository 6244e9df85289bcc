use axum::{routing::get, Router};

pub mod inventory;
pub mod system;

/// Router for every endpoint the service exposes.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::index).fallback(system::method_not_allowed))
        .route("/health", get(system::health).fallback(system::method_not_allowed))
        .merge(inventory::router())
        .fallback(system::route_not_found)
}
