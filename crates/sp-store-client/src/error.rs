//! Inventory store error types.

use thiserror::Error;

/// Errors surfaced by inventory store implementations.
///
/// Which operation produced the error tells the caller whether it was a
/// fetch or a write failure; the variants only describe the mechanism.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("store returned HTTP {status}")]
    Status { status: u16 },

    #[error("response decode error: {0}")]
    Decode(String),
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            StoreError::Status {
                status: status.as_u16(),
            }
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}
