//! Request tracing.
//!
//! The router opens an `info` span named `request` carrying `method` and
//! `path`; this module closes the loop once the response is ready.

use std::time::Instant;

use tracing::info;

use crate::response::Response;

/// Logs the outcome of a request inside its span.
pub fn completed(response: &Response, started: Instant) {
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
    info!(status = response.status_code(), latency_ms, "request completed");
}
