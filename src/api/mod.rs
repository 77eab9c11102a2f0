//! HTTP API module for the promotion editor.
//!
//! This module exposes the validator and the wire-shape normalizer over
//! HTTP so that other back-office services can check promotion documents.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, IssueResponse, ValidationResponse};
pub use state::AppState;
