use thiserror::Error;

/// Failures talking to the valuation API. None of these are retried.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Client configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
}
