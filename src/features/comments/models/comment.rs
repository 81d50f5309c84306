use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One entry in the flat, append-only comment feed.
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}
