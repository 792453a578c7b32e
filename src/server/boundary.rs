//! Centralized failure handling.
//!
//! Every failure inside the router becomes an [`ApiError`]. Its response is
//! always the generic `500 {"error": "Internal Server Error"}`; the failure's
//! description travels in the response extensions as a [`FailureDetail`].
//!
//! [`error_boundary`] sits just inside the request id middleware. It takes the
//! detail off the response and emits it as an `error` event tagged with the
//! request id, so the detail reaches the event log and nothing else. Panics
//! are converted by [`panic_response`] (installed through `CatchPanicLayer`)
//! and follow the same path.

use std::any::Any;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::context::RequestContext;
use super::events::EventLogger;
use super::handlers::ErrorResponse;
use crate::error::ApiError;

/// Internal description of a failure, attached to the generic 500 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetail(pub String);

/// The generic 500 response with no detail attached.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(ErrorResponse::INTERNAL_SERVER_ERROR)),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = internal_error_response();
        response
            .extensions_mut()
            .insert(FailureDetail(self.to_string()));
        response
    }
}

/// Axum middleware that turns failures into `error` events.
///
/// Responses carrying a [`FailureDetail`] are logged with the request id (or
/// `null` when the request id middleware did not run) and returned with the
/// detail stripped. Other responses pass through unchanged.
pub async fn error_boundary(
    State(events): State<EventLogger>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone());

    let mut response = next.run(request).await;

    if let Some(FailureDetail(detail)) = response.extensions_mut().remove::<FailureDetail>() {
        events.error(request_id.as_deref(), &detail);
    }

    response
}

/// Convert a caught panic into an [`ApiError::Panic`] response.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Panic(message).into_response()
}
