//! # Sitelens Server
//!
//! HTTP API for the Sitelens audit platform.
//!
//! ## Overview
//!
//! The server exposes:
//!
//! - **Audits**: submit a URL, get back a scored audit report
//! - **Audit catalog**: the available audit types and their check counts
//! - **Generators**: robots.txt, sitemap, and meta-tag snippets from a
//!   typed request body
//!
//! ## Architecture
//!
//! The server is built on Axum. All audit logic lives in
//! `sitelens-core`; this crate only wires configuration, shared state,
//! rate limiting, and the HTTP surface.

#![allow(missing_docs)]

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use errors::{AppError, AppResult};
pub use state::AppState;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Assemble the full application router.
pub fn build_app(state: AppState) -> Router {
    routes::create_api_router(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
