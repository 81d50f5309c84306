use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The caller identity resolved from a session token.
///
/// Created once at login and fixed for the lifetime of the session; the
/// `is_admin` flag is never re-derived after that point.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub is_admin: bool,
    pub is_anonymous: bool,
}

/// The raw bearer token a request arrived with, kept in request extensions
/// so the logout handler can discard the right session.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);
