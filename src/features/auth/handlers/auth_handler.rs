use axum::{extract::State, http::StatusCode, Extension, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto, LogoutResponseDto};
use crate::features::auth::model::{CurrentUser, SessionToken};
use crate::features::auth::services::SessionService;
use crate::shared::types::ApiResponse;

/// Create a session
///
/// Accepts a display name (plus the shared secret when the name is "admin"),
/// or `anonymous: true` for a generated guest identity.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 201, description = "Session created", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Neither a name nor anonymous: true supplied"),
        (status = 401, description = "Wrong admin password")
    )
)]
pub async fn login(
    State(sessions): State<Arc<SessionService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<LoginResponseDto>>), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (token, user) = sessions.login(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(LoginResponseDto { token, user }),
            None,
            None,
        )),
    ))
}

/// Return the caller's identity
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current identity", body = ApiResponse<CurrentUser>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn me(user: CurrentUser) -> Json<ApiResponse<CurrentUser>> {
    Json(ApiResponse::success(Some(user), None, None))
}

/// Discard the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session discarded", body = ApiResponse<LogoutResponseDto>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    State(sessions): State<Arc<SessionService>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Json<ApiResponse<LogoutResponseDto>>, AppError> {
    let logged_out = sessions.logout(&token).await;

    Ok(Json(ApiResponse::success(
        Some(LogoutResponseDto { logged_out }),
        Some("Logged out".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::middleware::auth_middleware;
    use crate::features::auth::routes;
    use axum::http::{header, HeaderValue};
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::json;

    fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
    }

    fn server() -> TestServer {
        let sessions = Arc::new(SessionService::new("secret".to_string()));

        let protected = routes::protected_routes(Arc::clone(&sessions)).route_layer(
            axum::middleware::from_fn_with_state(Arc::clone(&sessions), auth_middleware),
        );

        let app = Router::new()
            .merge(routes::public_routes(sessions))
            .merge(protected);

        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_login_me_logout_roundtrip() {
        let server = server();

        let res = server
            .post("/api/auth/login")
            .json(&json!({"name": "alice"}))
            .await;
        assert_eq!(res.status_code(), StatusCode::CREATED);
        let body: ApiResponse<LoginResponseDto> = res.json();
        let token = body.data.unwrap().token;

        let res = server.get("/api/auth/me").add_header(header::AUTHORIZATION, bearer(&token)).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        let body: ApiResponse<CurrentUser> = res.json();
        let user = body.data.unwrap();
        assert_eq!(user.name, "alice");
        assert!(!user.is_admin);

        let res = server
            .post("/api/auth/logout")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        assert_eq!(res.status_code(), StatusCode::OK);

        // The token no longer resolves
        let res = server.get("/api/auth/me").add_header(header::AUTHORIZATION, bearer(&token)).await;
        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_requests() {
        let server = server();

        // Neither a name nor anonymous
        let res = server.post("/api/auth/login").json(&json!({})).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

        // Name failing the display-name pattern
        let res = server
            .post("/api/auth/login")
            .json(&json!({"name": " alice"}))
            .await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

        // Wrong admin secret
        let res = server
            .post("/api/auth/login")
            .json(&json!({"name": "Admin", "password": "wrong"}))
            .await;
        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_anonymous_login() {
        let server = server();

        let res = server
            .post("/api/auth/login")
            .json(&json!({"anonymous": true}))
            .await;
        assert_eq!(res.status_code(), StatusCode::CREATED);

        let body: ApiResponse<LoginResponseDto> = res.json();
        let user = body.data.unwrap().user;
        assert!(user.is_anonymous);
        assert!(user.name.starts_with("guest-"));
    }
}
