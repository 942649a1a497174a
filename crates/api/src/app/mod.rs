//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared application services (the catalog)
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware::{self, AuthState};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router with an empty catalog.
pub fn build_app(auth: AuthState) -> Router {
    build_app_with_services(auth, Arc::new(services::AppServices::new()))
}

/// Build the full HTTP router around existing services.
pub fn build_app_with_services(auth: AuthState, services: Arc<services::AppServices>) -> Router {
    // Protected routes: every matched route requires a verified token.
    let protected = routes::router().route_layer(
        ServiceBuilder::new()
            .layer(Extension(services))
            .layer(axum::middleware::from_fn_with_state(
                auth,
                middleware::auth_middleware,
            )),
    );

    Router::new()
        .route("/", get(routes::system::health))
        .route("/health", get(routes::system::health))
        .merge(protected)
}
