use thiserror::Error;

/// Failures raised while dispatching a request.
///
/// Every variant is translated into the same generic 500 response by the
/// error boundary; the `Display` text only ever reaches the event log.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Request body could not be buffered
    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    /// Request did not declare a JSON content type
    #[error("Unsupported content type: expected 'application/json', got {found:?}")]
    UnsupportedContentType { found: Option<String> },

    /// Body is not valid JSON
    #[error("Failed to decode JSON body: {0}")]
    InvalidJson(String),

    /// Body is valid JSON but not an object, so fields cannot be looked up
    #[error("Expected a JSON object body, got {found}")]
    NotAnObject { found: &'static str },

    /// Field is present but does not hold the expected type
    #[error("Field '{field}' must be a {expected}, got {found}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// No route matches the request path
    #[error("Not Found: {path}")]
    NotFound { path: String },

    /// Route exists but not for this method
    #[error("Method Not Allowed: {method} {path}")]
    MethodNotAllowed { method: String, path: String },

    /// Response body could not be encoded
    #[error("Failed to encode response: {0}")]
    Encode(String),

    /// Handler ran without the request id middleware in front of it
    #[error("Request context missing: request id middleware not installed")]
    MissingRequestContext,

    /// Handler panicked
    #[error("Handler panicked: {0}")]
    Panic(String),
}

/// Name of a JSON value's type, used in error descriptions.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
