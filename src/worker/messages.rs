//! Transport worker message types.
//!
//! This module defines the request and response protocol between the
//! orchestrator and the transport worker that executes network calls. Each
//! search and upload request carries a monotonically increasing sequence
//! number assigned by the orchestrator; responses echo it back so stale
//! resolutions can be discarded under the latest-request-wins policy.
//!
//! Messages also propagate distributed tracing context so spans created while
//! executing a request link back to the span that dispatched it.

use crate::domain::{BahethError, SearchResult, UploadCandidate, UploadReceipt};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-boundary span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when a request is executed away from the dispatching span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across the boundary.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Macro to generate builder methods for [`TransportRequest`] variants.
///
/// Generates convenience constructors that automatically attach the current
/// trace context to each request variant.
macro_rules! transport_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl TransportRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

transport_request_builders! {
    search(Search { seq: u64, query: String }),
    upload(Upload { seq: u64, candidate: UploadCandidate, bytes: Vec<u8> }),
    probe(Probe {}),
}

/// Requests dispatched by the orchestrator to the transport worker.
///
/// Search and upload requests carry the sequence number the orchestrator
/// assigned when issuing them. The availability probe is fired once per
/// session and carries no sequence number: its response is always applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportRequest {
    /// Execute a search against the remote index.
    Search {
        /// Sequence number assigned at dispatch time.
        seq: u64,

        /// The validated, non-blank query string.
        query: String,

        /// Trace context for linking spans across the boundary.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Upload a selected file for indexing.
    Upload {
        /// Sequence number assigned at dispatch time.
        seq: u64,

        /// Metadata of the selected file.
        candidate: UploadCandidate,

        /// Raw file contents for the multipart body.
        bytes: Vec<u8>,

        /// Trace context for linking spans across the boundary.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Probe service liveness. Issued once per session, never retried.
    Probe {
        /// Trace context for linking spans across the boundary.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl TransportRequest {
    /// Short name of the request variant, for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Search { .. } => "search",
            Self::Upload { .. } => "upload",
            Self::Probe { .. } => "probe",
        }
    }
}

/// A failed transport outcome, detached from the error type so it can cross
/// serialization boundaries.
///
/// Distinct from a successful empty result set: zero matches never produce a
/// `TransportFailure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportFailure {
    /// HTTP status code, when the server produced a response.
    pub status_code: Option<u16>,

    /// Description of what went wrong.
    pub message: String,

    /// Whether the call exceeded the configured request timeout.
    pub timed_out: bool,
}

impl TransportFailure {
    /// Converts a client error into its wire-safe failure form.
    #[must_use]
    pub fn from_error(error: &BahethError) -> Self {
        match error {
            BahethError::Transport {
                status_code,
                message,
            } => Self {
                status_code: *status_code,
                message: message.clone(),
                timed_out: false,
            },
            BahethError::Timeout(message) => Self {
                status_code: None,
                message: message.clone(),
                timed_out: true,
            },
            other => Self {
                status_code: None,
                message: other.to_string(),
                timed_out: false,
            },
        }
    }
}

/// Responses sent from the transport worker back to the orchestrator.
///
/// Each variant corresponds to the completion of one request, either
/// successfully with result data or with a failure description. The
/// orchestrator converts failures into banner text; they never propagate
/// further as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportResponse {
    /// A search request completed, possibly with zero results.
    SearchCompleted {
        /// Sequence number of the originating request.
        seq: u64,

        /// The query the search was issued for.
        query: String,

        /// Normalized results in backend relevance order.
        results: Vec<SearchResult>,
    },

    /// A search request failed at the transport level.
    SearchFailed {
        /// Sequence number of the originating request.
        seq: u64,

        /// The query the search was issued for.
        query: String,

        /// Description of the failure.
        failure: TransportFailure,
    },

    /// An upload request completed.
    UploadCompleted {
        /// Sequence number of the originating request.
        seq: u64,

        /// The candidate that was uploaded.
        candidate: UploadCandidate,

        /// Server acknowledgment of the upload.
        receipt: UploadReceipt,
    },

    /// An upload request failed at the transport level.
    UploadFailed {
        /// Sequence number of the originating request.
        seq: u64,

        /// Description of the failure.
        failure: TransportFailure,
    },

    /// The availability probe completed.
    ProbeCompleted {
        /// Whether the service answered the probe with a 2xx response.
        reachable: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_produce_matching_variants() {
        let request = TransportRequest::search(3, "budget".to_string());
        match request {
            TransportRequest::Search { seq, ref query, .. } => {
                assert_eq!(seq, 3);
                assert_eq!(query, "budget");
            }
            _ => panic!("expected a search request"),
        }
        assert_eq!(request.name(), "search");
        assert_eq!(TransportRequest::probe().name(), "probe");
    }

    #[test]
    fn failure_preserves_status_code() {
        let error = BahethError::Transport {
            status_code: Some(503),
            message: "service unavailable".to_string(),
        };
        let failure = TransportFailure::from_error(&error);
        assert_eq!(failure.status_code, Some(503));
        assert!(!failure.timed_out);
    }

    #[test]
    fn failure_marks_timeouts() {
        let failure = TransportFailure::from_error(&BahethError::Timeout("30s".to_string()));
        assert!(failure.timed_out);
        assert_eq!(failure.status_code, None);
    }
}
