//! Admin endpoints.
//!
//! Currently a single stats snapshot: file counts by moderation status plus
//! upvote, comment, and live-session totals. Admin only.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AdminService;
