pub mod errors;
pub mod html;
pub mod json;

pub use errors::{html_error_response, json_error_response, ResultResp};
pub use html::html_response;
pub use json::json_response;
