//! # Text Gateway
//!
//! A small HTTP service exposing three text endpoints behind a shared bearer
//! token, with per-request correlation ids and JSON lifecycle events.
//!
//! ## Features
//!
//! - **Bearer authentication**: `/chat`, `/summarize` and `/extract` require
//!   `Authorization: Bearer <token>`
//! - **Request ids**: every request gets a UUIDv4 carried by all of its events
//! - **Structured events**: one JSON object per line for request received,
//!   response sent and error
//! - **Single error boundary**: any failure, including panics and routing
//!   misses, becomes a generic 500 with the detail kept in the event log
//!
//! ## Architecture
//!
//! - [`transform`] - The text transforms themselves
//! - [`server`] - Axum router, middleware and handlers
//! - [`config`] - CLI and environment configuration
//! - [`logging`] - Tracing subscriber setup
//! - [`error`] - Failure types
//!
//! ## Example
//!
//! ```rust,no_run
//! use text_gateway::{create_router, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = create_router(RouterConfig::new("my-secret-token"));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod transform;

// Re-export commonly used types
pub use config::Config;
pub use error::ApiError;
pub use server::{
    auth_middleware, create_router, error_boundary, request_id_middleware, with_pipeline,
    AppState, AuthError, BearerAuth, ChatResponse, Endpoint, ErrorResponse, EventKind,
    EventLogger, EventSink, ExtractResponse, HealthResponse, LogEvent, RequestContext,
    RouterConfig, SummarizeResponse, TracingSink, PROTECTED_PATHS,
};
pub use transform::{extract_keywords, reply, summarize};
