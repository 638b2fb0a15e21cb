//! Transport worker implementation.
//!
//! This module executes transport requests away from the orchestrator so
//! network latency never blocks session-state reads. The worker processes one
//! request at a time: search and upload are already serialized by the
//! orchestrator's mutual-exclusion rule, so no internal parallelism is
//! needed or wanted.
//!
//! Hosts either call [`TransportWorker::handle_request`] directly from their
//! own scheduling, or hand the worker to [`run`] with a pair of channels and
//! drive it on a background thread.

use crate::domain::Result;
use crate::transport::{HttpBackend, SearchBackend};
use crate::worker::{TransportRequest, TransportResponse};
use crate::Config;
use std::sync::mpsc::{Receiver, Sender};

use super::messages::TransportFailure;

/// Executes transport requests against a search backend.
///
/// Owns the backend for the lifetime of the session. The backend is injected
/// so tests can substitute a canned implementation.
pub struct TransportWorker {
    backend: Box<dyn SearchBackend>,
}

impl TransportWorker {
    /// Creates a worker around an injected backend.
    #[must_use]
    pub fn new(backend: Box<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// Creates a worker with the production HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Box::new(HttpBackend::new(config)?)))
    }

    /// Processes a transport request and returns the matching response.
    ///
    /// Failures are converted into response variants here; this function
    /// never propagates an error. Attaches the request's trace context so
    /// spans created while executing link back to the dispatching span.
    pub fn handle_request(&self, request: TransportRequest) -> TransportResponse {
        let _context_guard = attach_parent_trace_context(&request);

        let span = tracing::debug_span!("transport_handle_request", request = request.name());
        let _guard = span.entered();

        match request {
            TransportRequest::Search { seq, query, .. } => match self.backend.search(&query) {
                Ok(results) => {
                    tracing::debug!(seq = seq, result_count = results.len(), "search completed");
                    TransportResponse::SearchCompleted {
                        seq,
                        query,
                        results,
                    }
                }
                Err(e) => {
                    tracing::debug!(seq = seq, error = %e, "search failed");
                    TransportResponse::SearchFailed {
                        seq,
                        query,
                        failure: TransportFailure::from_error(&e),
                    }
                }
            },
            TransportRequest::Upload {
                seq,
                candidate,
                bytes,
                ..
            } => match self.backend.upload(&candidate, bytes) {
                Ok(receipt) => {
                    tracing::debug!(
                        seq = seq,
                        storage_key = %receipt.storage_key,
                        "upload completed"
                    );
                    TransportResponse::UploadCompleted {
                        seq,
                        candidate,
                        receipt,
                    }
                }
                Err(e) => {
                    tracing::debug!(seq = seq, error = %e, "upload failed");
                    TransportResponse::UploadFailed {
                        seq,
                        failure: TransportFailure::from_error(&e),
                    }
                }
            },
            TransportRequest::Probe { .. } => {
                let reachable = self.backend.check_availability();
                tracing::debug!(reachable = reachable, "availability probe completed");
                TransportResponse::ProbeCompleted { reachable }
            }
        }
    }
}

/// Drives a worker from a request channel until the channel closes.
///
/// Responses are sent back on the response channel; the loop ends when either
/// side hangs up. Intended to run on a host-owned background thread.
pub fn run(
    worker: &TransportWorker,
    requests: &Receiver<TransportRequest>,
    responses: &Sender<TransportResponse>,
) {
    for request in requests.iter() {
        let response = worker.handle_request(request);
        if responses.send(response).is_err() {
            tracing::debug!("response channel closed, stopping worker loop");
            break;
        }
    }
}

/// Attaches the parent trace context from a request to the current thread.
///
/// Reconstructs the OpenTelemetry context from the serialized trace
/// information in the request, allowing spans created while executing to be
/// linked to their dispatching spans. Returns a guard that must be held for
/// the duration of the operation.
fn attach_parent_trace_context(request: &TransportRequest) -> Option<opentelemetry::ContextGuard> {
    use opentelemetry::trace::{
        SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
    };

    let trace_context = match request {
        TransportRequest::Search { trace_context, .. }
        | TransportRequest::Upload { trace_context, .. }
        | TransportRequest::Probe { trace_context } => trace_context,
    }
    .as_ref()?;

    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(
        trace_id,
        span_id,
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    );

    let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);
    Some(otel_context.attach())
}
