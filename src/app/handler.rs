//! Event handling: the orchestrator's state machine.
//!
//! All mutation of [`SessionState`] happens here. Each handled event returns
//! whether the visible state changed and the actions the host must perform.
//! Transport failures arrive as response events and are converted to banner
//! text; they never propagate out of this module as errors.

use crate::app::actions::Action;
use crate::app::modes::Mode;
use crate::app::state::SessionState;
use crate::domain::{FileCategory, Result, UploadCandidate};
use crate::worker::{TransportFailure, TransportRequest, TransportResponse};

/// Largest file the uploader accepts.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

const OVERSIZED_MESSAGE: &str = "File is too large. Maximum size is 5MB.";
const UNSUPPORTED_TYPE_MESSAGE: &str =
    "File type not supported. Please upload PDF, DOCX, TXT, PPT, or XLS files.";
const UPLOAD_FAILED_MESSAGE: &str = "Error uploading file. Please try again.";

/// Events fed into the orchestrator.
///
/// User intents come from the host's input layer; transport responses come
/// from the worker. Both travel through the same handler so there is a single
/// writer for session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The page session began. Triggers the one availability probe.
    SessionStarted,

    /// The user submitted a search query.
    SubmitSearch(String),

    /// The user selected a file in the uploader.
    SelectFile {
        /// File name as reported by the picker.
        name: String,

        /// MIME type as reported by the picker.
        mime_type: String,

        /// Raw file contents.
        bytes: Vec<u8>,
    },

    /// The user toggled the uploader panel.
    ToggleUploader,

    /// The user cleared the session back to its initial state.
    Clear,

    /// The user asked for the dedicated full-results surface.
    OpenFullResults,

    /// A transport request resolved.
    TransportResponse(TransportResponse),
}

/// Handles one event against the session state.
///
/// Returns `(redraw, actions)`: whether the visible state changed, and the
/// side effects the host must carry out in order.
///
/// # Errors
///
/// Reserved for host-integration failures; the transitions themselves are
/// infallible and transport failures surface as banners, not errors.
pub fn handle_event(state: &mut SessionState, event: Event) -> Result<(bool, Vec<Action>)> {
    let outcome = match event {
        Event::SessionStarted => handle_session_started(state),
        Event::SubmitSearch(query) => handle_submit_search(state, &query),
        Event::SelectFile {
            name,
            mime_type,
            bytes,
        } => handle_select_file(state, name, mime_type, bytes),
        Event::ToggleUploader => handle_toggle_uploader(state),
        Event::Clear => {
            state.clear();
            (true, Vec::new())
        }
        Event::OpenFullResults => (
            false,
            vec![Action::OpenFullResults {
                query: state.query.clone(),
                results: state.results.clone(),
            }],
        ),
        Event::TransportResponse(response) => handle_transport_response(state, response),
    };
    Ok(outcome)
}

fn handle_session_started(state: &mut SessionState) -> (bool, Vec<Action>) {
    if state.probe_issued {
        tracing::debug!("availability probe already issued, ignoring session start");
        return (false, Vec::new());
    }
    state.probe_issued = true;
    (false, vec![Action::Dispatch(TransportRequest::probe())])
}

fn handle_submit_search(state: &mut SessionState, query: &str) -> (bool, Vec<Action>) {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        tracing::debug!("blank query suppressed");
        return (false, Vec::new());
    }
    if state.mode == Mode::Uploading {
        tracing::warn!("search rejected while an upload is in flight");
        return (false, Vec::new());
    }

    // A search while Searching supersedes the in-flight one: the new
    // sequence number makes the earlier response stale.
    state.banner = None;
    state.uploader_visible = false;
    state.query = trimmed.to_string();
    state.mode = Mode::Searching;
    let seq = state.next_seq();
    tracing::info!(seq = seq, query = %state.query, "search dispatched");
    (
        true,
        vec![Action::Dispatch(TransportRequest::search(
            seq,
            trimmed.to_string(),
        ))],
    )
}

fn handle_select_file(
    state: &mut SessionState,
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
) -> (bool, Vec<Action>) {
    if state.mode.is_busy() {
        tracing::warn!(mode = ?state.mode, "file selection rejected while busy");
        return (false, Vec::new());
    }

    let candidate = UploadCandidate::new(name, bytes.len() as u64, mime_type);
    if candidate.byte_size > MAX_UPLOAD_BYTES {
        tracing::warn!(size = candidate.byte_size, "upload candidate oversized");
        state.set_error_banner(OVERSIZED_MESSAGE);
        return (true, Vec::new());
    }
    // CSV is a display category for search results only; the uploader takes
    // the document formats named in the banner text.
    if matches!(
        candidate.category(),
        FileCategory::Unknown | FileCategory::Csv
    ) {
        tracing::warn!(name = %candidate.name, "upload candidate type unsupported");
        state.set_error_banner(UNSUPPORTED_TYPE_MESSAGE);
        return (true, Vec::new());
    }

    state.banner = None;
    state.upload = Some(candidate.clone());
    state.mode = Mode::Uploading;
    let seq = state.next_seq();
    tracing::info!(seq = seq, name = %candidate.name, "upload dispatched");
    (
        true,
        vec![Action::Dispatch(TransportRequest::upload(
            seq, candidate, bytes,
        ))],
    )
}

fn handle_toggle_uploader(state: &mut SessionState) -> (bool, Vec<Action>) {
    state.uploader_visible = !state.uploader_visible;
    state.banner = None;
    if matches!(state.mode, Mode::ShowingResults | Mode::ShowingError) {
        state.mode = Mode::Idle;
    }
    (true, Vec::new())
}

fn handle_transport_response(
    state: &mut SessionState,
    response: TransportResponse,
) -> (bool, Vec<Action>) {
    match response {
        TransportResponse::SearchCompleted {
            seq,
            query,
            results,
        } => {
            if state.is_stale(seq) {
                tracing::debug!(seq = seq, latest = state.latest_seq, "stale search ignored");
                return (false, Vec::new());
            }
            state.query = query;
            state.upload = None;
            if results.is_empty() {
                state.set_info_banner(format!(
                    "No results found for \"{}\". Try a different search term.",
                    state.query
                ));
            } else {
                state.banner = None;
            }
            state.results = results;
            state.mode = Mode::ShowingResults;
            (true, Vec::new())
        }
        TransportResponse::SearchFailed { seq, failure, .. } => {
            if state.is_stale(seq) {
                tracing::debug!(seq = seq, latest = state.latest_seq, "stale failure ignored");
                return (false, Vec::new());
            }
            tracing::warn!(seq = seq, status = ?failure.status_code, message = %failure.message, "search failed");
            // Prior results stay in state; only the mode and banner change.
            state.upload = None;
            state.set_error_banner(failure_banner("Error searching documents.", &failure));
            state.mode = Mode::ShowingError;
            (true, Vec::new())
        }
        TransportResponse::UploadCompleted { seq, candidate, .. } => {
            if state.is_stale(seq) {
                tracing::debug!(seq = seq, latest = state.latest_seq, "stale upload ignored");
                return (false, Vec::new());
            }
            // Chain the follow-up search on the file's stem. The session
            // stays in Uploading until that search resolves.
            let stem = candidate
                .name
                .split('.')
                .next()
                .unwrap_or(&candidate.name)
                .to_string();
            state.query = stem.clone();
            let next = state.next_seq();
            tracing::info!(seq = next, query = %stem, "follow-up search dispatched");
            (
                true,
                vec![Action::Dispatch(TransportRequest::search(next, stem))],
            )
        }
        TransportResponse::UploadFailed { seq, failure } => {
            if state.is_stale(seq) {
                tracing::debug!(seq = seq, latest = state.latest_seq, "stale failure ignored");
                return (false, Vec::new());
            }
            tracing::warn!(seq = seq, status = ?failure.status_code, message = %failure.message, "upload failed");
            state.upload = None;
            state.set_error_banner(failure_banner(UPLOAD_FAILED_MESSAGE, &failure));
            state.mode = Mode::ShowingError;
            (true, Vec::new())
        }
        TransportResponse::ProbeCompleted { reachable } => {
            tracing::info!(reachable = reachable, "availability probe resolved");
            state.api_reachable = Some(reachable);
            (true, Vec::new())
        }
    }
}

fn failure_banner(prefix: &str, failure: &TransportFailure) -> String {
    match failure.status_code {
        Some(code) => format!("{prefix} (Status: {code})"),
        None => prefix.to_string(),
    }
}
