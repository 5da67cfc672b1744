//! Redirect response construction.
//!
//! # Design Decisions
//! - Always 303 See Other, whatever the request method
//! - Location is the stored URL verbatim; URLs that cannot be carried in a
//!   header are rejected rather than mangled

use axum::http::header::{InvalidHeaderValue, LOCATION};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Build a `303 See Other` response pointing at `url`.
pub fn see_other(url: &str) -> Result<Response, InvalidHeaderValue> {
    let location = HeaderValue::from_str(url)?;
    Ok((StatusCode::SEE_OTHER, [(LOCATION, location)]).into_response())
}
