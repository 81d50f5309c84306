#[cfg(test)]
use crate::features::auth::model::CurrentUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
#[allow(dead_code)]
pub fn create_admin_user() -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        name: "admin".to_string(),
        is_admin: true,
        is_anonymous: false,
    }
}

#[cfg(test)]
#[allow(dead_code)]
pub fn create_named_user(name: &str) -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        name: name.to_string(),
        is_admin: false,
        is_anonymous: false,
    }
}

/// Wraps a router with a middleware that injects the given user into every
/// request, bypassing the session layer in handler tests.
#[cfg(test)]
#[allow(dead_code)]
pub fn with_auth(router: Router, user: CurrentUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}
