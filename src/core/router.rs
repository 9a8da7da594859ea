use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::StatusCode, routing::get, Router};

use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::users::{routes as users_routes, UserProfileService};

/// Banner served at `/`
pub const SERVICE_BANNER: &str = "Reports Backend API";

async fn root() -> &'static str {
    SERVICE_BANNER
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All API routes plus the root banner and health probe.
///
/// Swagger and the tracing/CORS layers are added by the binary.
pub fn build_router(
    report_service: Arc<ReportService>,
    user_profile_service: Arc<UserProfileService>,
    max_request_body_size: usize,
) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(users_routes(user_profile_service))
        .merge(reports_routes(report_service))
        .layer(DefaultBodyLimit::max(max_request_body_size))
}
