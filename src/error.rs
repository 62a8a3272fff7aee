//! Error types
//!
//! The coordinator operations themselves are total while the coordinator is
//! alive. These errors cover misuse of the access path, use of a handle
//! after dispose and malformed open requests.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModalError {
    /// The access path was never bound to a coordinator
    #[error("modal access requested outside of any ModalCoordinator; bind the context with ModalContext::provide first")]
    NotProvided,

    /// The coordinator behind a context or handle has been torn down
    #[error("the ModalCoordinator behind this handle has been disposed")]
    Disposed,

    /// An open request could not be parsed (e.g. missing `modalId`)
    #[error("invalid modal request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}
