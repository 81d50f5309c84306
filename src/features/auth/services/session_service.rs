use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::LoginRequestDto;
use crate::features::auth::model::CurrentUser;
use crate::shared::constants::{ADMIN_NAME, GUEST_NAME_PREFIX};

/// Issues and resolves opaque session tokens.
///
/// Sessions live in process memory for their whole lifetime: created at
/// login, never mutated, and only removed by an explicit logout. No expiry is
/// modeled. The admin grant happens exactly once, here, at login time.
pub struct SessionService {
    admin_password: String,
    sessions: RwLock<HashMap<String, CurrentUser>>,
}

impl SessionService {
    pub fn new(admin_password: String) -> Self {
        Self {
            admin_password,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session for the given login request and return the bearer
    /// token together with the resolved identity.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<(String, CurrentUser)> {
        let user = self.resolve_identity(dto)?;

        let token = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(token.clone(), user.clone());

        info!(
            "Session created: user={}, is_admin={}, is_anonymous={}",
            user.name, user.is_admin, user.is_anonymous
        );

        Ok((token, user))
    }

    /// Look up the identity attached to a token.
    pub async fn resolve(&self, token: &str) -> Option<CurrentUser> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Discard a session. Returns whether the token was known.
    pub async fn logout(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Number of live sessions, reported by the admin stats endpoint.
    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn resolve_identity(&self, dto: LoginRequestDto) -> Result<CurrentUser> {
        if dto.anonymous {
            // Anonymous callers get a generated name and are never admin
            let suffix = Uuid::new_v4().simple().to_string();
            return Ok(CurrentUser {
                id: Uuid::new_v4(),
                name: format!("{}-{}", GUEST_NAME_PREFIX, &suffix[..8]),
                is_admin: false,
                is_anonymous: true,
            });
        }

        let name = dto
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                AppError::Validation("Either a name or anonymous: true is required".to_string())
            })?;

        let is_admin = if name.eq_ignore_ascii_case(ADMIN_NAME) {
            let password = dto.password.as_deref().unwrap_or_default();
            if password != self.admin_password {
                return Err(AppError::Unauthorized(
                    "Invalid admin password".to_string(),
                ));
            }
            true
        } else {
            false
        };

        Ok(CurrentUser {
            id: Uuid::new_v4(),
            name: name.to_string(),
            is_admin,
            is_anonymous: false,
        })
    }
}
