//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name stamped on every exported span.
const SERVICE_NAME: &str = "baheth-client";

/// Initializes the tracing subscriber for the session.
///
/// Always installs a stderr formatting layer filtered by `config.trace_level`
/// (default `info`). When `config.trace_file` is set, additionally installs
/// an OpenTelemetry layer whose spans are exported as JSON lines to that
/// file, rotated by size.
///
/// Safe to call more than once; only the first call installs a subscriber.
/// Initialization failures are swallowed: observability never blocks the
/// session from starting.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info").to_string();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let otel_layer = config.trace_file.as_ref().map(|trace_file| {
        let resource = Resource::new(vec![opentelemetry::KeyValue::new(
            "service.name",
            SERVICE_NAME,
        )]);
        let provider = tracer::create_tracer_provider(PathBuf::from(trace_file), resource);
        OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME))
    });

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
