//! Flat comment feed.
//!
//! Append-only list of comments sitting alongside the files, with no
//! threading and no relation to individual records. Returned in insertion
//! order.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::CommentService;
