//! Request extractors whose rejections use the API error body
//!
//! axum's own `Json`, `Path` and `Query` reject with plain-text 400/415/422
//! responses. These wrappers route every rejection through `ApiError`, so a
//! malformed body, id or query string is a `400 VALIDATION_ERROR`.

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// Query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);
