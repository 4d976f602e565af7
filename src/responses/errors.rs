use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use tracing::{error, warn};

/// Convert a ServerError into a `{"error": ...}` JSON response.
pub fn json_error_response(err: ServerError) -> Response {
    let status = err.status();
    log_error(&err);

    let body = serde_json::json!({ "error": err.to_string() }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

/// Server-side failures keep their full detail in the log only.
pub fn log_error(err: &ServerError) {
    match err {
        ServerError::Upstream(inner) => error!("Upstream failure: {inner}"),
        e if e.status() >= 500 => error!("Request failed: {e}"),
        e => warn!("Request rejected ({}): {e}", e.status()),
    }
}
