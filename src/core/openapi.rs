use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::auth::{self, dtos as auth_dtos, handlers as auth_handlers};
use crate::features::comments::{dtos as comments_dtos, handlers as comments_handlers};
use crate::features::files::{dtos as files_dtos, handlers as files_handlers, models as files_models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::me,
        auth_handlers::logout,
        // Files
        files_handlers::upload_file,
        files_handlers::list_files,
        files_handlers::approve_file,
        files_handlers::reject_file,
        files_handlers::upvote_file,
        files_handlers::download_file,
        // Comments
        comments_handlers::create_comment,
        comments_handlers::list_comments,
        // Admin
        admin_handlers::get_stats,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::CurrentUser,
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            auth_dtos::LogoutResponseDto,
            ApiResponse<auth_dtos::LoginResponseDto>,
            ApiResponse<auth_dtos::LogoutResponseDto>,
            ApiResponse<auth::model::CurrentUser>,
            // Files
            files_models::FileStatus,
            files_dtos::UploadFileDto,
            files_dtos::FileResponseDto,
            files_dtos::UpvoteResponseDto,
            ApiResponse<files_dtos::FileResponseDto>,
            ApiResponse<Vec<files_dtos::FileResponseDto>>,
            ApiResponse<files_dtos::UpvoteResponseDto>,
            // Comments
            comments_dtos::CreateCommentDto,
            comments_dtos::CommentResponseDto,
            ApiResponse<comments_dtos::CommentResponseDto>,
            ApiResponse<Vec<comments_dtos::CommentResponseDto>>,
            // Admin
            admin_dtos::StatsResponseDto,
            ApiResponse<admin_dtos::StatsResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Login, logout, and session identity"),
        (name = "files", description = "File upload, moderation, voting, and download"),
        (name = "comments", description = "Flat comment feed"),
        (name = "admin", description = "Admin endpoints"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "ShareLit API",
        version = "0.1.0",
        description = "API documentation for ShareLit",
    )
)]
pub struct ApiDoc;

/// Adds the bearer session token security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
