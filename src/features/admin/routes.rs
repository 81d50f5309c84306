use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create routes for the admin feature
pub fn routes(service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/api/admin/stats", get(handlers::get_stats))
        .with_state(service)
}
