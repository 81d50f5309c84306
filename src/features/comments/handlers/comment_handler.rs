use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::auth::model::CurrentUser;
use crate::features::comments::dtos::{CommentResponseDto, CreateCommentDto};
use crate::features::comments::services::CommentService;
use crate::shared::types::{ApiResponse, Meta};

/// Post a comment
#[utoipa::path(
    post,
    path = "/api/comments",
    tag = "comments",
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment posted", body = ApiResponse<CommentResponseDto>),
        (status = 400, description = "Empty or oversized comment"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_comment(
    user: CurrentUser,
    State(service): State<Arc<CommentService>>,
    AppJson(dto): AppJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponseDto>>), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let comment = service.create(dto.text, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(comment.into()), None, None)),
    ))
}

/// List the comment feed
#[utoipa::path(
    get,
    path = "/api/comments",
    tag = "comments",
    responses(
        (status = 200, description = "All comments, oldest first", body = ApiResponse<Vec<CommentResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_comments(
    _user: CurrentUser,
    State(service): State<Arc<CommentService>>,
) -> Result<Json<ApiResponse<Vec<CommentResponseDto>>>, AppError> {
    let comments = service.list().await?;
    let total = comments.len() as i64;
    let dtos: Vec<CommentResponseDto> = comments.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}
