// errors.rs
use crate::upstream::UpstreamError;
use astra::Response;
use thiserror::Error;

/// Errors originating from request handling (validation, lookups) or from
/// downstream layers (upstream API, DB, spreadsheet export).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// The property exists but carries no coordinates to search around.
    #[error("{0}")]
    NotLocated(String),

    // Upstream details only go to the log.
    #[error("Upstream valuation service failed")]
    Upstream(#[from] UpstreamError),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::Validation(_) | ServerError::NotLocated(_) => 400,
            ServerError::NotFound(_) => 404,
            ServerError::Upstream(_)
            | ServerError::DbError(_)
            | ServerError::XlsxError(_)
            | ServerError::InternalError => 500,
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
