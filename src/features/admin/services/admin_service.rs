use std::sync::Arc;

use crate::core::error::Result;
use crate::features::admin::dtos::StatsResponseDto;
use crate::features::auth::SessionService;
use crate::modules::store::Store;

/// Service backing the admin stats endpoint
pub struct AdminService {
    store: Arc<dyn Store>,
    sessions: Arc<SessionService>,
}

impl AdminService {
    pub fn new(store: Arc<dyn Store>, sessions: Arc<SessionService>) -> Self {
        Self { store, sessions }
    }

    pub async fn stats(&self) -> Result<StatsResponseDto> {
        let stats = self.store.stats().await?;
        let active_sessions = self.sessions.active_sessions().await as i64;

        Ok(StatsResponseDto {
            total_files: stats.total_files,
            pending_files: stats.pending_files,
            approved_files: stats.approved_files,
            rejected_files: stats.rejected_files,
            total_upvotes: stats.total_upvotes,
            total_comments: stats.total_comments,
            active_sessions,
        })
    }
}
