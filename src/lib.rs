//! Dynamic appointment pricing engine.
//!
//! The evaluator in [`pricing`] is a pure function over borrowed
//! configuration; the rest of the crate serves it over HTTP.

pub mod config;
pub mod error;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::pricing::PricingCatalog;

/// Shared application state; read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PricingCatalog>,
}

impl AppState {
    pub fn new(catalog: PricingCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .merge(pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
