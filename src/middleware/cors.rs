//! Permissive CORS.
//!
//! Any origin may call the API. Preflight (`OPTIONS`) requests are answered
//! with `204` without touching the handlers; whatever headers the browser
//! asks to send are allowed.

use crate::response::Response;
use crate::status::Status;

const ALLOW_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";
const ALLOW_HEADERS: &str = "content-type";

/// Answer for an `OPTIONS` preflight request.
///
/// `requested` is the preflight's `access-control-request-headers`, echoed
/// back when present.
pub fn preflight(requested: Option<&str>) -> Response {
    let allow_headers = requested
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or(ALLOW_HEADERS);

    Response::builder()
        .status(Status::NoContent)
        .header("access-control-allow-methods", ALLOW_METHODS)
        .header("access-control-allow-headers", allow_headers)
        .no_body()
}

/// Adds the allow-origin header unless a handler already set one.
pub fn decorate(response: &mut Response) {
    if response.header("access-control-allow-origin").is_none() {
        response.push_header("access-control-allow-origin", "*");
    }
}
