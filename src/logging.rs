//! Tracing subscriber setup.
//!
//! Two `fmt` layers share one registry:
//!
//! - **events**: records under [`EVENT_TARGET`], printed on stdout as the bare
//!   message, i.e. exactly one JSON object per line
//! - **diagnostics**: everything else (startup, auth debug, HTTP traces) in the
//!   usual human-readable format on stderr, filtered by `RUST_LOG`

use std::fmt;

use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::{
    filter::{self, FilterExt},
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::server::events::EVENT_TARGET;

/// Event formatter that writes only the event's fields, with no timestamp,
/// level, target or span context.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventLineFormat;

impl<S, N> FormatEvent<S, N> for EventLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn is_event_record(meta: &Metadata<'_>) -> bool {
    meta.target() == EVENT_TARGET
}

/// Default diagnostic filter when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "text_gateway=debug,tower_http=debug"
    } else {
        "text_gateway=info,tower_http=info"
    }
}

/// Layer printing lifecycle events, and nothing else, to `make_writer`.
pub fn event_layer<S, W>(make_writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .event_format(EventLineFormat)
        .with_ansi(false)
        .with_writer(make_writer)
        .with_filter(filter::filter_fn(is_event_record))
}

/// Initialize the tracing/logging subsystem.
pub fn init_logging(verbose: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into());

    let diagnostics = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter.and(filter::filter_fn(|meta| !is_event_record(meta))));

    tracing_subscriber::registry()
        .with(diagnostics)
        .with(event_layer(std::io::stdout))
        .init();
}
