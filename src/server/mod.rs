//! HTTP server layer for Text Gateway.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │          POST /chat   POST /summarize   POST /extract           │
//! │                                                                 │
//! │  ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌──────────────┐  │
//! │  │  context  │  │ boundary  │  │   auth    │  │   handlers   │  │
//! │  │(request id)│ │ (errors)  │  │ (bearer)  │  │  (endpoints) │  │
//! │  └───────────┘  └───────────┘  └───────────┘  └──────────────┘  │
//! │                        events (JSON lines)                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod boundary;
pub mod context;
pub mod events;
pub mod handlers;
pub mod routes;

pub use auth::{auth_middleware, is_protected, AuthError, BearerAuth, PROTECTED_PATHS};
pub use boundary::{error_boundary, panic_response, FailureDetail};
pub use context::{request_id_middleware, RequestContext};
pub use events::{Endpoint, EventKind, EventLogger, EventSink, LogEvent, TracingSink, EVENT_TARGET};
pub use handlers::{
    chat_handler, extract_handler, health_handler, summarize_handler, AppState, ChatResponse,
    ErrorResponse, ExtractResponse, HealthResponse, JsonPayload, SummarizeResponse,
};
pub use routes::{create_router, with_pipeline, RouterConfig};
