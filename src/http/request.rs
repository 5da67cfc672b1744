//! Request identification.
//!
//! # Responsibilities
//! - Name the correlation header shared by every layer
//! - Read the request ID for structured logs
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - IDs are UUID v4, generated by tower-http's `MakeRequestUuid`

use axum::http::Request;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The request's correlation ID, or `"unknown"` if none was assigned.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
