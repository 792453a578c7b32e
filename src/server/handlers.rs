//! HTTP request handlers for the Text Gateway API.
//!
//! # Endpoints
//!
//! - `POST /chat` - Echo a message back
//! - `POST /summarize` - Truncate long text
//! - `POST /extract` - Pick out long words
//! - `GET /health` - Health check endpoint
//!
//! The three text endpoints share one flow: parse the JSON body, emit
//! `<endpoint>_request_received`, compute, emit `<endpoint>_response_sent`,
//! respond. Any failure returns an [`ApiError`] and is turned into the generic
//! 500 by the error boundary; the sent event is skipped in that case.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{
        header::{ALLOW, CONTENT_TYPE},
        Method, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::context::RequestContext;
use super::events::{Endpoint, EventLogger};
use crate::error::{json_type_name, ApiError};
use crate::transform;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state.
///
/// This is passed to all handlers via Axum's State extractor.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Destination for lifecycle events
    pub events: EventLogger,
}

impl AppState {
    /// Create a new application state with the given event logger.
    pub fn new(events: EventLogger) -> Self {
        Self { events }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error body returned for 401 and 500 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Fixed, client-safe description
    pub error: String,
}

impl ErrorResponse {
    pub const UNAUTHORIZED: &'static str = "Unauthorized";
    pub const INTERNAL_SERVER_ERROR: &'static str = "Internal Server Error";

    /// Create a new error response.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Response of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Response of `POST /summarize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Response of `POST /extract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub keywords: Vec<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// JSON Body Extraction
// =============================================================================

/// Raw JSON request body.
///
/// Rejects with [`ApiError`] when the content type is not JSON or the body
/// does not parse, so those failures flow through the error boundary like any
/// other.
#[derive(Debug, Clone)]
pub struct JsonPayload(pub Value);

/// Whether a `Content-Type` value denotes JSON (`application/json` or
/// `application/*+json`, parameters ignored).
pub fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

        if !content_type.as_deref().is_some_and(is_json_content_type) {
            return Err(ApiError::UnsupportedContentType {
                found: content_type,
            });
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BodyRead(rejection.body_text()))?;

        let value =
            serde_json::from_slice(&body).map_err(|e| ApiError::InvalidJson(e.to_string()))?;

        Ok(JsonPayload(value))
    }
}

/// Read a string field from a JSON object body.
///
/// A missing field yields the empty string. A body that is not an object, or
/// a field holding anything other than a string, is an error.
pub fn string_field<'a>(payload: &'a Value, field: &'static str) -> Result<&'a str, ApiError> {
    let object = payload.as_object().ok_or(ApiError::NotAnObject {
        found: json_type_name(payload),
    })?;

    match object.get(field) {
        None => Ok(""),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(ApiError::InvalidField {
            field,
            expected: "string",
            found: json_type_name(other),
        }),
    }
}

/// Log the outbound body and hand it back for the response.
fn respond<T: Serialize>(
    state: &AppState,
    endpoint: Endpoint,
    ctx: &RequestContext,
    response: T,
) -> Result<Json<T>, ApiError> {
    let logged = serde_json::to_value(&response).map_err(|e| ApiError::Encode(e.to_string()))?;
    state
        .events
        .response_sent(endpoint, &ctx.request_id, logged);
    Ok(Json(response))
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle chat requests.
///
/// # Endpoint
///
/// `POST /chat` with body `{"message": "<text>"}`
///
/// # Response
///
/// `{"reply": "You said: <text>"}`
pub async fn chat_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<ChatResponse>, ApiError> {
    state
        .events
        .request_received(Endpoint::Chat, &ctx.request_id, &payload);

    let message = string_field(&payload, "message")?;
    let response = ChatResponse {
        reply: transform::reply(message),
    };

    respond(&state, Endpoint::Chat, &ctx, response)
}

/// Handle summarize requests.
///
/// # Endpoint
///
/// `POST /summarize` with body `{"text": "<text>"}`
///
/// # Response
///
/// `{"summary": "<first 50 characters>..."}`, or the text unchanged when it
/// is 50 characters or fewer.
pub async fn summarize_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<SummarizeResponse>, ApiError> {
    state
        .events
        .request_received(Endpoint::Summarize, &ctx.request_id, &payload);

    let text = string_field(&payload, "text")?;
    let response = SummarizeResponse {
        summary: transform::summarize(text),
    };

    respond(&state, Endpoint::Summarize, &ctx, response)
}

/// Handle keyword extraction requests.
///
/// # Endpoint
///
/// `POST /extract` with body `{"text": "<text>"}`
///
/// # Response
///
/// `{"keywords": [...]}` with every whitespace-separated token longer than
/// five characters, in order.
pub async fn extract_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<ExtractResponse>, ApiError> {
    state
        .events
        .request_received(Endpoint::Extract, &ctx.request_id, &payload);

    let text = string_field(&payload, "text")?;
    let response = ExtractResponse {
        keywords: transform::extract_keywords(text),
    };

    respond(&state, Endpoint::Extract, &ctx, response)
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Methods advertised by `OPTIONS` on the text endpoints.
pub const TEXT_ENDPOINT_METHODS: &str = "OPTIONS, POST";

/// Methods advertised by `OPTIONS` on `/health`.
pub const HEALTH_METHODS: &str = "GET, HEAD, OPTIONS";

fn allowed_methods(methods: &'static str) -> Response {
    (StatusCode::OK, [(ALLOW, methods)]).into_response()
}

/// Answer `OPTIONS` on a text endpoint with its allowed methods.
///
/// Runs behind the auth gate like the endpoint itself and emits no events.
pub async fn text_options_handler() -> Response {
    allowed_methods(TEXT_ENDPOINT_METHODS)
}

/// Answer `OPTIONS /health` with its allowed methods.
pub async fn health_options_handler() -> Response {
    allowed_methods(HEALTH_METHODS)
}

/// Fallback for paths with no route.
pub async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::NotFound {
        path: uri.path().to_string(),
    }
}

/// Fallback for known paths requested with an unsupported method.
pub async fn method_not_allowed_handler(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
