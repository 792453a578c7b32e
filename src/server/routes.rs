//! Router configuration for Text Gateway.
//!
//! # Route Structure
//!
//! ```text
//! /health       - GET, public
//! /chat         - POST, protected
//! /summarize    - POST, protected
//! /extract      - POST, protected
//!
//! Every route also answers OPTIONS with an `Allow` header.
//! ```
//!
//! # Layer Order
//!
//! Outermost first:
//!
//! ```text
//! request id  ->  trace (optional)  ->  error boundary  ->  catch panic  ->  auth  ->  routes
//! ```
//!
//! # Example
//!
//! ```ignore
//! use text_gateway::server::routes::{create_router, RouterConfig};
//!
//! let router = create_router(RouterConfig::new("my-secret-token"));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, router).await?;
//! ```

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use http::Request;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::auth::{auth_middleware, BearerAuth};
use super::boundary::{error_boundary, panic_response};
use super::context::{request_id_middleware, RequestContext};
use super::events::{Endpoint, EventLogger, EventSink, TracingSink};
use super::handlers::{
    chat_handler, extract_handler, health_handler, health_options_handler,
    method_not_allowed_handler, not_found_handler, summarize_handler, text_options_handler,
    AppState,
};

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone, Debug)]
pub struct RouterConfig {
    /// Shared secret expected as the bearer token
    pub api_token: String,

    /// Whether to enable request tracing
    pub enable_tracing: bool,

    /// Destination for lifecycle events
    pub events: EventLogger,

    /// Maximum request body size in bytes; `None` accepts bodies of any size
    pub body_limit: Option<usize>,
}

impl RouterConfig {
    /// Create a new router configuration with the given API token.
    ///
    /// By default:
    /// - Events go to [`TracingSink`]
    /// - Tracing is enabled
    /// - Request bodies are not size limited
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            enable_tracing: true,
            events: EventLogger::new(TracingSink),
            body_limit: None,
        }
    }

    /// Send lifecycle events to a different sink.
    pub fn with_event_sink(mut self, sink: impl EventSink) -> Self {
        self.events = EventLogger::new(sink);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }

    /// Cap request bodies at `limit` bytes. Larger bodies fail like any other
    /// unreadable body.
    pub fn with_body_limit(mut self, limit: Option<usize>) -> Self {
        self.body_limit = limit;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - The three protected text endpoints and the public health check
/// - `OPTIONS` on each route, listing its methods
/// - Fallbacks routing unknown paths and methods into the error boundary
/// - The request pipeline from [`with_pipeline`]
pub fn create_router(config: RouterConfig) -> Router {
    let app_state = AppState::new(config.events.clone());

    let routes = Router::new()
        .route(
            Endpoint::Chat.path(),
            post(chat_handler).options(text_options_handler),
        )
        .route(
            Endpoint::Summarize.path(),
            post(summarize_handler).options(text_options_handler),
        )
        .route(
            Endpoint::Extract.path(),
            post(extract_handler).options(text_options_handler),
        )
        .route(
            "/health",
            get(health_handler).options(health_options_handler),
        )
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(app_state);

    with_pipeline(routes, &config)
}

/// Wrap a router in the request pipeline: request id, optional tracing, error
/// boundary, panic catching, the auth gate and the body size limit.
pub fn with_pipeline(routes: Router, config: &RouterConfig) -> Router {
    let auth = BearerAuth::new(&config.api_token);

    let body_limit = match config.body_limit {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    let router = routes
        .layer(body_limit)
        .layer(middleware::from_fn_with_state(auth, auth_middleware))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            config.events.clone(),
            error_boundary,
        ));

    // Tracing goes inside the request id layer so spans can carry the id
    let router = if config.enable_tracing {
        router.layer(TraceLayer::new_for_http().make_span_with(make_request_span))
    } else {
        router
    };

    router.layer(middleware::from_fn(request_id_middleware))
}

/// Build the tracing span for one request.
fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.as_str())
        .unwrap_or("-");

    tracing::debug_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

// =============================================================================
// Tests
// =============================================================================
