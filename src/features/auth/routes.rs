use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::auth::handlers;
use crate::features::auth::services::SessionService;

/// Routes that must be reachable without a session (login itself).
pub fn public_routes(sessions: Arc<SessionService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .with_state(sessions)
}

/// Routes behind the session middleware.
pub fn protected_routes(sessions: Arc<SessionService>) -> Router {
    Router::new()
        .route("/api/auth/me", get(handlers::me))
        .route("/api/auth/logout", post(handlers::logout))
        .with_state(sessions)
}
