//! Actions the orchestrator asks the host to perform.

use crate::domain::SearchResult;
use crate::worker::TransportRequest;

/// Side effects emitted by event handling.
///
/// The orchestrator itself performs no I/O; each handled event returns the
/// actions the host must carry out, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hand a request to the transport worker.
    Dispatch(TransportRequest),

    /// Open the dedicated full-results surface with a snapshot of the
    /// current query and results.
    OpenFullResults {
        /// Query the snapshot belongs to.
        query: String,

        /// Results in backend relevance order.
        results: Vec<SearchResult>,
    },
}
