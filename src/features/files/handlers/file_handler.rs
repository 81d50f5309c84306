use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::auth::model::CurrentUser;
use crate::features::files::dtos::{FileResponseDto, UploadFileDto, UpvoteResponseDto};
use crate::features::files::services::FileService;
use crate::shared::types::{ApiResponse, Meta};

/// Upload a file
///
/// Accepts multipart/form-data with a single `file` field. Allowed types are
/// pdf, epub, mp3, jpg, and png, up to 10 MiB. Uploads by an admin are
/// approved immediately; everyone else's start pending.
#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "files",
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "File upload form",
    ),
    responses(
        (status = 201, description = "File uploaded successfully", body = ApiResponse<FileResponseDto>),
        (status = 400, description = "Missing file field"),
        (status = 401, description = "Authentication required"),
        (status = 413, description = "File too large"),
        (status = 415, description = "File type not allowed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_file(
    user: CurrentUser,
    State(service): State<Arc<FileService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<FileResponseDto>>), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
                content_type = Some(ct);
            }
            _ => {
                // Ignore unknown fields
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;

    let record = service
        .upload(file_data, &file_name, &content_type, &user)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(record.into()), None, None)),
    ))
}

/// List files visible to the caller
///
/// Admins see every record including rejected tombstones; everyone else sees
/// only approved files. Records are returned in upload order.
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    responses(
        (status = 200, description = "Visible files", body = ApiResponse<Vec<FileResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_files(
    user: CurrentUser,
    State(service): State<Arc<FileService>>,
) -> Result<Json<ApiResponse<Vec<FileResponseDto>>>, AppError> {
    let files = service.list(user.is_admin).await?;
    let total = files.len() as i64;
    let dtos: Vec<FileResponseDto> = files.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Approve a pending file
#[utoipa::path(
    post,
    path = "/api/files/{id}/approve",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File id")
    ),
    responses(
        (status = 200, description = "File approved", body = ApiResponse<FileResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "File not found"),
        (status = 409, description = "File already moderated")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn approve_file(
    user: CurrentUser,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FileResponseDto>>, AppError> {
    let record = service.approve(id, user.is_admin).await?;

    Ok(Json(ApiResponse::success(
        Some(record.into()),
        Some("File approved".to_string()),
        None,
    )))
}

/// Reject a pending file
///
/// The record is kept as a rejected tombstone visible to admins; the stored
/// bytes are removed.
#[utoipa::path(
    post,
    path = "/api/files/{id}/reject",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File id")
    ),
    responses(
        (status = 200, description = "File rejected", body = ApiResponse<FileResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "File not found"),
        (status = 409, description = "File already moderated")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reject_file(
    user: CurrentUser,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FileResponseDto>>, AppError> {
    let record = service.reject(id, user.is_admin).await?;

    Ok(Json(ApiResponse::success(
        Some(record.into()),
        Some("File rejected".to_string()),
        None,
    )))
}

/// Upvote an approved file
///
/// Each user may upvote a given file at most once; a second attempt returns
/// 409 and leaves the count unchanged.
#[utoipa::path(
    post,
    path = "/api/files/{id}/upvote",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File id")
    ),
    responses(
        (status = 200, description = "Vote recorded", body = ApiResponse<UpvoteResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "File not found or not approved"),
        (status = 409, description = "Already upvoted")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upvote_file(
    user: CurrentUser,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UpvoteResponseDto>>, AppError> {
    let upvote_count = service.upvote(user.id, id).await?;

    Ok(Json(ApiResponse::success(
        Some(UpvoteResponseDto { upvote_count }),
        None,
        None,
    )))
}

/// Download the file bytes
///
/// Non-admin callers may only download approved files.
#[utoipa::path(
    get,
    path = "/api/files/{id}/download",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File id")
    ),
    responses(
        (status = 200, description = "File bytes", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "File is awaiting moderation"),
        (status = 404, description = "File not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn download_file(
    user: CurrentUser,
    State(service): State<Arc<FileService>>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let record = service.download(id, user.is_admin).await?;
    let bytes = service.read_blob(&record).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        record.original_name.replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, record.mime_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StorageConfig;
    use crate::core::middleware::auth_middleware;
    use crate::features::auth::dtos::LoginResponseDto;
    use crate::features::auth::routes as auth_routes;
    use crate::features::auth::SessionService;
    use crate::features::files::models::FileStatus;
    use crate::features::files::routes::routes as file_routes;
    use crate::modules::storage::{BlobStore, LocalBlobStore, MAX_FILE_SIZE};
    use crate::modules::store::{MemoryStore, Store};
    use axum::body::Bytes;
    use axum::http::HeaderValue;
    use axum::Router;
    use axum_test::{TestResponse, TestServer};
    use serde_json::json;

    async fn test_server() -> TestServer {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let root = std::env::temp_dir().join(format!("sharelit-http-test-{}", Uuid::new_v4()));
        let blobs: Arc<dyn BlobStore> =
            Arc::new(LocalBlobStore::new(StorageConfig { root }).await.unwrap());
        let sessions = Arc::new(SessionService::new("secret".to_string()));
        let file_service = Arc::new(FileService::new(store, blobs));

        let protected = Router::new()
            .merge(file_routes(file_service))
            .route_layer(axum::middleware::from_fn_with_state(
                Arc::clone(&sessions),
                auth_middleware,
            ));

        let app = Router::new()
            .merge(auth_routes::public_routes(sessions))
            .merge(protected);

        TestServer::new(app).unwrap()
    }

    fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
    }

    async fn login(server: &TestServer, body: serde_json::Value) -> String {
        let res = server.post("/api/auth/login").json(&body).await;
        assert_eq!(res.status_code(), StatusCode::CREATED);

        let body: ApiResponse<LoginResponseDto> = res.json();
        body.data.unwrap().token
    }

    fn multipart_body(filename: &str, content_type: &str, data: &[u8]) -> (String, Vec<u8>) {
        let boundary = "sharelit-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\n\
                 Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        (format!("multipart/form-data; boundary={boundary}"), body)
    }

    async fn upload(
        server: &TestServer,
        token: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> TestResponse {
        let (mime, body) = multipart_body(filename, content_type, data);
        server
            .post("/api/files/upload")
            .add_header(header::AUTHORIZATION, bearer(token))
            .add_header(header::CONTENT_TYPE, HeaderValue::from_str(&mime).unwrap())
            .bytes(Bytes::from(body))
            .await
    }

    fn file_dto(res: &TestResponse) -> FileResponseDto {
        let body: ApiResponse<FileResponseDto> = res.json();
        body.data.unwrap()
    }

    fn file_list(res: &TestResponse) -> Vec<FileResponseDto> {
        let body: ApiResponse<Vec<FileResponseDto>> = res.json();
        body.data.unwrap()
    }

    #[tokio::test]
    async fn test_moderation_and_upvote_flow() {
        let server = test_server().await;
        let admin = login(&server, json!({"name": "admin", "password": "secret"})).await;
        let user = login(&server, json!({"name": "user-1"})).await;

        // Admin upload is approved immediately
        let res = upload(&server, &admin, "report.pdf", "application/pdf", b"%PDF-1.4 report").await;
        assert_eq!(res.status_code(), StatusCode::CREATED);
        let report = file_dto(&res);
        assert_eq!(report.status, FileStatus::Approved);
        assert_eq!(report.upvote_count, 0);

        // Non-admin upload starts pending
        let res = upload(&server, &user, "notes.pdf", "application/pdf", b"%PDF-1.4 notes").await;
        assert_eq!(res.status_code(), StatusCode::CREATED);
        let notes = file_dto(&res);
        assert_eq!(notes.status, FileStatus::Pending);

        // Admin sees both, the user only the approved one
        let res = server.get("/api/files").add_header(header::AUTHORIZATION, bearer(&admin)).await;
        assert_eq!(file_list(&res).len(), 2);

        let res = server.get("/api/files").add_header(header::AUTHORIZATION, bearer(&user)).await;
        let visible = file_list(&res);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, report.id);

        // First upvote counts, the second conflicts and leaves the count alone
        let res = server
            .post(&format!("/api/files/{}/upvote", report.id))
            .add_header(header::AUTHORIZATION, bearer(&user))
            .await;
        assert_eq!(res.status_code(), StatusCode::OK);
        let body: ApiResponse<UpvoteResponseDto> = res.json();
        assert_eq!(body.data.unwrap().upvote_count, 1);

        let res = server
            .post(&format!("/api/files/{}/upvote", report.id))
            .add_header(header::AUTHORIZATION, bearer(&user))
            .await;
        assert_eq!(res.status_code(), StatusCode::CONFLICT);

        let res = server.get("/api/files").add_header(header::AUTHORIZATION, bearer(&user)).await;
        assert_eq!(file_list(&res)[0].upvote_count, 1);

        // Approval makes the pending file visible to the user
        let res = server
            .post(&format!("/api/files/{}/approve", notes.id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await;
        assert_eq!(res.status_code(), StatusCode::OK);

        let res = server.get("/api/files").add_header(header::AUTHORIZATION, bearer(&user)).await;
        assert_eq!(file_list(&res).len(), 2);
    }

    #[tokio::test]
    async fn test_upload_rejections_happen_before_record_creation() {
        let server = test_server().await;
        let user = login(&server, json!({"name": "user-1"})).await;

        let res = upload(&server, &user, "tool.exe", "application/x-msdownload", b"MZ").await;
        assert_eq!(res.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        // One byte over the blob store's cap, still under the route's body limit
        let big = vec![0u8; MAX_FILE_SIZE + 1];
        let res = upload(&server, &user, "big.pdf", "application/pdf", &big).await;
        assert_eq!(res.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

        let admin = login(&server, json!({"name": "admin", "password": "secret"})).await;
        let res = server.get("/api/files").add_header(header::AUTHORIZATION, bearer(&admin)).await;
        assert!(file_list(&res).is_empty());
    }

    #[tokio::test]
    async fn test_moderation_requires_admin() {
        let server = test_server().await;
        let user = login(&server, json!({"name": "user-1"})).await;
        let other = login(&server, json!({"name": "user-2"})).await;

        let res = upload(&server, &user, "notes.pdf", "application/pdf", b"%PDF-1.4").await;
        let notes = file_dto(&res);

        let res = server
            .post(&format!("/api/files/{}/approve", notes.id))
            .add_header(header::AUTHORIZATION, bearer(&other))
            .await;
        assert_eq!(res.status_code(), StatusCode::FORBIDDEN);

        let res = server
            .post(&format!("/api/files/{}/reject", notes.id))
            .add_header(header::AUTHORIZATION, bearer(&other))
            .await;
        assert_eq!(res.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_download_visibility() {
        let server = test_server().await;
        let admin = login(&server, json!({"name": "admin", "password": "secret"})).await;
        let user = login(&server, json!({"name": "user-1"})).await;

        let res = upload(&server, &user, "notes.pdf", "application/pdf", b"%PDF-1.4 notes").await;
        let notes = file_dto(&res);

        // Pending: the uploader cannot download it, an admin can
        let res = server
            .get(&format!("/api/files/{}/download", notes.id))
            .add_header(header::AUTHORIZATION, bearer(&user))
            .await;
        assert_eq!(res.status_code(), StatusCode::FORBIDDEN);

        let res = server
            .get(&format!("/api/files/{}/download", notes.id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.text(), "%PDF-1.4 notes");

        // Approved: everyone can
        server
            .post(&format!("/api/files/{}/approve", notes.id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await;

        let res = server
            .get(&format!("/api/files/{}/download", notes.id))
            .add_header(header::AUTHORIZATION, bearer(&user))
            .await;
        assert_eq!(res.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_requests_without_session_are_rejected() {
        let server = test_server().await;

        let res = server.get("/api/files").await;
        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);

        let res = server
            .get("/api/files")
            .add_header(header::AUTHORIZATION, bearer("not-a-session"))
            .await;
        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
    }
}
