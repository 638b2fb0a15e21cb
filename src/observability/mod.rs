//! Observability: tracing setup and file-based span export.
//!
//! The pipeline runs from `tracing` macros through an OpenTelemetry layer to
//! a size-rotated local trace file, so sessions can be analyzed offline.
//! Trace context crosses the orchestrator/worker boundary via
//! [`TraceContext`](crate::worker::TraceContext).
//!
//! # Architecture
//!
//! - `init`: Subscriber construction from configuration
//! - `tracer`: Tracer provider and the JSON-line span exporter
//! - `file_writer`: Size-rotated append-only writer

pub mod file_writer;
pub mod init;
pub mod tracer;

pub use init::init_tracing;
