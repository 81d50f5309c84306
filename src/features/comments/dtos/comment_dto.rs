use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::comments::models::Comment;
use validator::Validate;

/// Request DTO for posting a comment
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    /// The comment body
    #[validate(length(min = 1, max = 500, message = "text must be 1-500 characters"))]
    #[schema(example = "Great upload, thanks!")]
    pub text: String,
}

/// Response DTO for one comment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponseDto {
    pub id: Uuid,
    pub text: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponseDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_name: comment.author_name,
            created_at: comment.created_at,
        }
    }
}
