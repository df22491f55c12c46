//! Middleware layer.
//!
//! Cross-cutting concerns applied by [`Router::dispatch`](crate::Router::dispatch)
//! around every request:
//! - [`trace`] — per-request span with method and path; logs status and latency
//! - [`cors`] — permissive CORS headers and preflight answers

pub mod cors;
pub mod trace;
