//! Error types for command handlers.

use std::error::Error;

use crate::crm::CrmError;
use crate::document::StoreError;

/// Error type for command handler operations.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// No handler registered for this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Record not found.
    #[error("{0}")]
    NotFound(String),
    /// Caller is authenticated (or anonymous) but lacks access.
    #[error("{0}")]
    Forbidden(String),
    /// Document store fault.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// Guard rejected the command (input validation failed).
    #[error("guard rejected command: {0}")]
    GuardRejected(String),
    /// Other error.
    #[error("handler error: {0}")]
    Other(Box<dyn Error + Send + Sync>),
}

impl From<CrmError> for HandlerError {
    fn from(err: CrmError) -> Self {
        match err {
            CrmError::NotFound(msg) => HandlerError::NotFound(msg),
            CrmError::PermissionDenied(msg) => HandlerError::Forbidden(msg),
            CrmError::Store(err) => HandlerError::Store(err),
        }
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::NotFound(_) => 404,
            HandlerError::Forbidden(_) => 403,
            HandlerError::Store(_) => 500,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Other(_) => 500,
        }
    }
}
