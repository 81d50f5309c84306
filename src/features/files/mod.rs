//! The file moderation and visibility ledger.
//!
//! Owns the lifecycle of uploaded-file records (pending -> approved /
//! rejected) and the upvote-once-per-user rule, and answers
//! visibility-filtered queries. Raw bytes live in the blob store; the ledger
//! only ever handles blob keys.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/files/upload` | Yes | Upload a file (multipart) |
//! | GET | `/api/files` | Yes | List files visible to the caller |
//! | POST | `/api/files/{id}/approve` | Admin | Approve a pending file |
//! | POST | `/api/files/{id}/reject` | Admin | Reject a pending file |
//! | POST | `/api/files/{id}/upvote` | Yes | Upvote an approved file once |
//! | GET | `/api/files/{id}/download` | Yes | Download the file bytes |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::FileService;
