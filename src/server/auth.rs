//! Bearer token authentication for Text Gateway.
//!
//! A fixed set of paths ([`PROTECTED_PATHS`]) requires the header
//!
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! where `<token>` equals the configured shared secret. Any other path passes
//! through untouched. A leading `Bearer ` is stripped if present; a header
//! without it is compared as-is, and a missing header compares as the empty
//! string.
//!
//! Rejected requests get `401 {"error": "Unauthorized"}` and never reach a
//! handler, so no lifecycle events are emitted for them.
//!
//! # Example
//!
//! ```rust
//! use text_gateway::server::auth::BearerAuth;
//!
//! let auth = BearerAuth::new("my-secret");
//! assert!(auth.verify(Some("Bearer my-secret")).is_ok());
//! assert!(auth.verify(Some("Bearer nope")).is_err());
//! assert!(auth.verify(None).is_err());
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;
use tracing::debug;

use super::handlers::ErrorResponse;

/// Paths that require a valid bearer token.
pub const PROTECTED_PATHS: [&str; 3] = ["/chat", "/summarize", "/extract"];

/// Scheme prefix stripped from the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Whether requests to `path` must be authenticated.
pub fn is_protected(path: &str) -> bool {
    PROTECTED_PATHS.contains(&path)
}

/// Token portion of an `Authorization` header value.
pub fn bearer_token(header: &str) -> &str {
    header.strip_prefix(BEARER_PREFIX).unwrap_or(header)
}

// =============================================================================
// Types
// =============================================================================

/// Authentication error types.
///
/// Both variants produce the same client-visible response; the distinction
/// only shows up in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header was sent
    MissingToken,

    /// A token was sent but does not match
    InvalidToken,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Missing authorization header"),
            AuthError::InvalidToken => write!(f, "Invalid bearer token"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        debug!(
            status = StatusCode::UNAUTHORIZED.as_u16(),
            "Authentication failed: {}", self
        );

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(ErrorResponse::UNAUTHORIZED)),
        )
            .into_response()
    }
}

// =============================================================================
// Bearer Authentication
// =============================================================================

/// Shared-secret bearer token check.
#[derive(Clone)]
pub struct BearerAuth {
    token: Arc<[u8]>,
}

impl BearerAuth {
    /// Create an authenticator expecting the given token.
    pub fn new(token: impl AsRef<[u8]>) -> Self {
        Self {
            token: Arc::from(token.as_ref()),
        }
    }

    /// Check an `Authorization` header value against the configured token.
    ///
    /// Comparison is constant-time with respect to the token contents.
    pub fn verify(&self, header: Option<&str>) -> Result<(), AuthError> {
        let provided = header.map(bearer_token).unwrap_or("");

        if bool::from(provided.as_bytes().ct_eq(&self.token[..])) {
            Ok(())
        } else if header.is_none() {
            Err(AuthError::MissingToken)
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware gating [`PROTECTED_PATHS`] behind [`BearerAuth`].
///
/// Applied to the whole router so the check is by path, independent of which
/// route (if any) would match.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware};
/// use text_gateway::server::auth::{BearerAuth, auth_middleware};
///
/// let app = Router::new()
///     .route("/chat", post(chat_handler))
///     .layer(middleware::from_fn_with_state(BearerAuth::new("secret"), auth_middleware));
/// ```
pub async fn auth_middleware(
    State(auth): State<BearerAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if is_protected(request.uri().path()) {
        // A non-UTF-8 header cannot match and is treated as absent.
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        auth.verify(header)?;
    }

    Ok(next.run(request).await)
}

// =============================================================================
// Tests
// =============================================================================
