//! Store error types.
//!
//! Used by repository implementations and callers of store APIs.

use thiserror::Error;

/// Errors that can occur when using store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Not found: {0}")]
    NotFound(String),
}
