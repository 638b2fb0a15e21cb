//! Transport worker for executing network requests off the event path.
//!
//! This module implements the message protocol and executor that keep
//! transport latency away from session-state reads. It includes distributed
//! tracing support so spans created while executing a request link back to
//! the span that dispatched it.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with sequence numbers and
//!   trace context propagation
//! - `handler`: Worker implementation and the channel-driven run loop

pub mod handler;
pub mod messages;

pub use handler::{run, TransportWorker};
pub use messages::{TraceContext, TransportFailure, TransportRequest, TransportResponse};
