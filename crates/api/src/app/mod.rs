//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repository selection and the handle shared with handlers
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use stockkeep_infra::InventoryRepository;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router around an already-opened repository.
pub fn build_app(repository: Arc<dyn InventoryRepository>) -> Router {
    let services = services::AppServices::new(repository);

    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::log_requests))
            .layer(Extension(services))
            .layer(axum::middleware::from_fn(middleware::require_json)),
    )
}
