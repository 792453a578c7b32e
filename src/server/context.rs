//! Per-request correlation context.
//!
//! [`request_id_middleware`] runs first for every request, generates a UUIDv4
//! and stores a [`RequestContext`] in the request's extensions. Handlers
//! extract it directly; middleware reads it from the extensions.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::ApiError;

/// Request-scoped context shared by all processing of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation id carried by every event of the request
    pub request_id: String,
}

impl RequestContext {
    /// Create a context with a freshly generated request id.
    pub fn generate() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Assign a request id before any other processing.
///
/// The id is internal only; nothing is added to the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(RequestContext::generate());
    next.run(request).await
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or(ApiError::MissingRequestContext)
    }
}
