//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the product catalog and its in-memory store
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router with a fresh, empty in-memory catalog.
pub fn build_app() -> Router {
    build_app_with(Arc::new(services::AppServices::in_memory()))
}

/// Build the router around existing services, so callers keep a handle on the catalog.
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::request_log_middleware))
            .layer(Extension(services)),
    )
}
