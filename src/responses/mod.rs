pub mod errors;
pub mod html;
pub mod json;
pub mod xlsx;

pub use errors::{json_error_response, log_error};
pub use html::html_response;
pub use json::{json_message, json_response};
pub use xlsx::xlsx_response;
