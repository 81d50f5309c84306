use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Snapshot of site activity for the admin dashboard
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponseDto {
    pub total_files: i64,
    pub pending_files: i64,
    pub approved_files: i64,
    pub rejected_files: i64,
    pub total_upvotes: i64,
    pub total_comments: i64,
    /// Sessions currently held by the identity provider
    pub active_sessions: i64,
}
