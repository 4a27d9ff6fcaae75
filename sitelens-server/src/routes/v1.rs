use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware::rate_limit;
use crate::state::AppState;

/// Create all v1 API routes.
pub fn create_v1_router(state: AppState) -> Router<AppState> {
    Router::new()
        // Audit submission sits behind the rate limiter.
        .route(
            "/audits",
            post(handlers::run_audit).layer(
                middleware::from_fn_with_state(state, rate_limit),
            ),
        )
        .route("/audit-types", get(handlers::list_audit_types))
        // Generators are cheap and unlimited.
        .route("/generate/robots", post(handlers::generate_robots))
        .route("/generate/sitemap", post(handlers::generate_sitemap))
        .route("/generate/meta", post(handlers::generate_meta))
}
