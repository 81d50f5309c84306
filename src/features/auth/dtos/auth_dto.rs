use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::CurrentUser;
use crate::shared::validation::DISPLAY_NAME_REGEX;

/// Login request. Exactly one of two shapes is accepted: a display name
/// (with a password when the name is "admin"), or `anonymous: true`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    /// Display name for the session
    #[validate(length(min = 1, max = 80, message = "name must be 1-80 characters"))]
    #[validate(regex(path = *DISPLAY_NAME_REGEX, message = "name contains invalid characters"))]
    #[schema(example = "alice")]
    pub name: Option<String>,

    /// Shared secret, required only for the admin login name
    pub password: Option<String>,

    /// Request an anonymous session with a generated display name
    #[serde(default)]
    pub anonymous: bool,
}

/// Response for a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    /// Opaque bearer token identifying the session
    pub token: String,
    /// The identity attached to the session
    pub user: CurrentUser,
}

/// Response for logout
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponseDto {
    /// Confirmation that the session was discarded
    pub logged_out: bool,
}
