//! OpenTelemetry tracer provider with file-based span export.
//!
//! Spans are exported to a size-rotated local file instead of a network
//! collector, so traces survive offline sessions and can be inspected with
//! ordinary line tools. Each line is one flattened JSON object per span.

use super::file_writer::RotatingWriter;
use chrono::{DateTime, SecondsFormat, Utc};
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

/// Span exporter that appends one JSON line per span to a rotating file.
struct FileSpanExporter {
    writer: RotatingWriter,
    service_name: String,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    fn new(file_path: PathBuf, resource: &Resource) -> Self {
        let service_name = resource
            .get(opentelemetry::Key::from_static_str("service.name"))
            .map_or_else(|| "unknown".to_string(), |v| v.as_str().into_owned());
        Self {
            writer: RotatingWriter::new(file_path),
            service_name,
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        for span in &batch {
            let line = span_line(span, &self.service_name).to_string();
            if let Err(e) = self.writer.append_line(&line) {
                return Box::pin(std::future::ready(Err(TraceError::from(e.to_string()))));
            }
        }
        Box::pin(std::future::ready(Ok(())))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        if let Some(name) = resource.get(opentelemetry::Key::from_static_str("service.name")) {
            self.service_name = name.as_str().into_owned();
        }
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("service_name", &self.service_name)
            .finish_non_exhaustive()
    }
}

/// Flattens one span into a single JSON object.
fn span_line(span: &SpanData, service_name: &str) -> serde_json::Value {
    let parent = if span.parent_span_id == opentelemetry::trace::SpanId::INVALID {
        serde_json::Value::Null
    } else {
        json!(format!("{:016x}", span.parent_span_id))
    };

    let attributes: serde_json::Map<String, serde_json::Value> = span
        .attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_json(&kv.value)))
        .collect();

    json!({
        "service": service_name,
        "trace_id": format!("{:032x}", span.span_context.trace_id()),
        "span_id": format!("{:016x}", span.span_context.span_id()),
        "parent_span_id": parent,
        "name": span.name,
        "start": rfc3339(span.start_time),
        "end": rfc3339(span.end_time),
        "duration_us": span
            .end_time
            .duration_since(span.start_time)
            .unwrap_or_default()
            .as_micros()
            .to_string(),
        "status": status_label(&span.status),
        "attributes": attributes,
    })
}

fn rfc3339(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn status_label(status: &opentelemetry::trace::Status) -> String {
    match status {
        opentelemetry::trace::Status::Unset => "unset".to_string(),
        opentelemetry::trace::Status::Ok => "ok".to_string(),
        opentelemetry::trace::Status::Error { description } => format!("error: {description}"),
    }
}

fn attribute_json(value: &opentelemetry::Value) -> serde_json::Value {
    use opentelemetry::Value;
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(format!("{value:?}")),
    }
}

/// Creates a tracer provider that exports spans to the given file.
///
/// Uses the simple (immediate) export strategy; batching buys nothing for a
/// local file and would lose spans on abrupt shutdown.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_map_to_native_json() {
        assert_eq!(attribute_json(&opentelemetry::Value::Bool(true)), json!(true));
        assert_eq!(attribute_json(&opentelemetry::Value::I64(42)), json!(42));
        assert_eq!(
            attribute_json(&opentelemetry::Value::String("budget".into())),
            json!("budget")
        );
    }

    #[test]
    fn status_labels_cover_all_variants() {
        assert_eq!(status_label(&opentelemetry::trace::Status::Unset), "unset");
        assert_eq!(status_label(&opentelemetry::trace::Status::Ok), "ok");
        assert_eq!(
            status_label(&opentelemetry::trace::Status::error("boom")),
            "error: boom"
        );
    }
}
