//! Structured request lifecycle events.
//!
//! Each event is a single JSON object:
//!
//! ```text
//! {"event": "chat_request_received", "request_id": "<uuid>", "payload": {...}}
//! {"event": "chat_response_sent",    "request_id": "<uuid>", "response": {...}}
//! {"event": "error",                 "request_id": "<uuid>", "error": "..."}
//! ```
//!
//! Events are handed to an [`EventSink`]. The default [`TracingSink`] writes
//! them through `tracing` under [`EVENT_TARGET`], which the binary's
//! subscriber prints as one bare line per event on stdout.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

/// Tracing target used for lifecycle events.
pub const EVENT_TARGET: &str = "text_gateway::events";

// =============================================================================
// Event Types
// =============================================================================

/// The protected text endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Chat,
    Summarize,
    Extract,
}

impl Endpoint {
    /// All protected endpoints.
    pub const ALL: [Endpoint; 3] = [Endpoint::Chat, Endpoint::Summarize, Endpoint::Extract];

    /// Short name used as the event tag prefix.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Chat => "chat",
            Endpoint::Summarize => "summarize",
            Endpoint::Extract => "extract",
        }
    }

    /// Route path served by this endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Chat => "/chat",
            Endpoint::Summarize => "/summarize",
            Endpoint::Extract => "/extract",
        }
    }
}

/// Lifecycle moment an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    RequestReceived(Endpoint),
    ResponseSent(Endpoint),
    Error,
}

impl EventKind {
    /// Value of the `event` field.
    pub fn tag(self) -> String {
        match self {
            EventKind::RequestReceived(endpoint) => {
                format!("{}_request_received", endpoint.name())
            }
            EventKind::ResponseSent(endpoint) => format!("{}_response_sent", endpoint.name()),
            EventKind::Error => "error".to_string(),
        }
    }

    /// Key under which the event's detail is stored.
    pub fn detail_key(self) -> &'static str {
        match self {
            EventKind::RequestReceived(_) => "payload",
            EventKind::ResponseSent(_) => "response",
            EventKind::Error => "error",
        }
    }
}

/// A single structured log record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEvent {
    /// Event tag (e.g. `chat_request_received`)
    pub event: String,

    /// Correlation id of the request, `null` when none was assigned
    pub request_id: Option<String>,

    /// Event-specific fields (`payload`, `response` or `error`)
    #[serde(flatten)]
    pub detail: Map<String, Value>,
}

impl LogEvent {
    /// Build an event of the given kind carrying `detail` under the kind's key.
    pub fn new(kind: EventKind, request_id: Option<&str>, detail: Value) -> Self {
        let mut fields = Map::new();
        fields.insert(kind.detail_key().to_string(), detail);
        Self {
            event: kind.tag(),
            request_id: request_id.map(str::to_string),
            detail: fields,
        }
    }

    /// Whether this is an `error` event.
    pub fn is_error(&self) -> bool {
        self.event == "error"
    }

    /// Serialize to a single JSON line.
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Destination for lifecycle events.
pub trait EventSink: Send + Sync + 'static {
    /// Record one event. Called in order within a request.
    fn emit(&self, event: &LogEvent);
}

/// Sink that writes events through `tracing` under [`EVENT_TARGET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &LogEvent) {
        let line = match event.to_line() {
            Ok(line) => line,
            Err(e) => {
                warn!(event = %event.event, "Failed to serialize log event: {}", e);
                return;
            }
        };

        if event.is_error() {
            error!(target: EVENT_TARGET, "{}", line);
        } else {
            info!(target: EVENT_TARGET, "{}", line);
        }
    }
}

// =============================================================================
// Logger
// =============================================================================

/// Emits lifecycle events for handlers and the error boundary.
#[derive(Clone)]
pub struct EventLogger {
    sink: Arc<dyn EventSink>,
}

impl EventLogger {
    /// Create a logger writing to the given sink.
    pub fn new(sink: impl EventSink) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Emit an event of any kind.
    pub fn emit(&self, kind: EventKind, request_id: Option<&str>, detail: Value) {
        self.sink.emit(&LogEvent::new(kind, request_id, detail));
    }

    /// Record the inbound body of a protected endpoint.
    pub fn request_received(&self, endpoint: Endpoint, request_id: &str, payload: &Value) {
        self.emit(
            EventKind::RequestReceived(endpoint),
            Some(request_id),
            payload.clone(),
        );
    }

    /// Record the outbound body of a protected endpoint.
    pub fn response_sent(&self, endpoint: Endpoint, request_id: &str, response: Value) {
        self.emit(EventKind::ResponseSent(endpoint), Some(request_id), response);
    }

    /// Record a failure caught by the error boundary.
    pub fn error(&self, request_id: Option<&str>, description: &str) {
        self.emit(
            EventKind::Error,
            request_id,
            Value::String(description.to_string()),
        );
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(TracingSink)
    }
}

impl std::fmt::Debug for EventLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLogger").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
