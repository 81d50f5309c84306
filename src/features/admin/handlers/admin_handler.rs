use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::admin::dtos::StatsResponseDto;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::ApiResponse;

/// Site activity snapshot
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "admin",
    responses(
        (status = 200, description = "Activity counts", body = ApiResponse<StatsResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_stats(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<StatsResponseDto>>, AppError> {
    let stats = service.stats().await?;

    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::admin::routes::routes as admin_routes;
    use crate::features::auth::model::CurrentUser;
    use crate::features::auth::SessionService;
    use crate::modules::store::{MemoryStore, Store};
    use crate::shared::test_helpers::{create_admin_user, create_named_user, with_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn server_as(user: CurrentUser) -> TestServer {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let sessions = Arc::new(SessionService::new("secret".to_string()));
        let service = Arc::new(AdminService::new(store, sessions));

        TestServer::new(with_auth(admin_routes(service), user)).unwrap()
    }

    #[tokio::test]
    async fn test_stats_for_admin() {
        let server = server_as(create_admin_user());

        let res = server.get("/api/admin/stats").await;
        assert_eq!(res.status_code(), StatusCode::OK);

        let body: ApiResponse<StatsResponseDto> = res.json();
        let stats = body.data.unwrap();
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.active_sessions, 0);
    }

    #[tokio::test]
    async fn test_stats_require_admin() {
        let server = server_as(create_named_user("alice"));

        let res = server.get("/api/admin/stats").await;
        assert_eq!(res.status_code(), StatusCode::FORBIDDEN);
    }
}
