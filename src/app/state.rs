//! Session state container.
//!
//! One live [`SessionState`] exists per page session. It is mutated only by
//! the orchestrator's event handler and read by the presentation adapter;
//! state is never persisted across reloads.

use crate::app::modes::{BannerKind, Mode};
use crate::domain::{SearchResult, UploadCandidate};
use serde::Serialize;

/// The single active banner.
///
/// Banners replace each other; the most recent transition's message wins and
/// nothing stacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    /// Informational or error severity.
    pub kind: BannerKind,

    /// Banner text.
    pub message: String,
}

/// Complete session state for the search/upload flow.
///
/// Invariants the orchestrator maintains:
/// - at most one of `Searching`/`Uploading` at any instant;
/// - `upload` is `Some` only while an upload flow is alive;
/// - `latest_seq` never decreases and is at least the number of the most
///   recently dispatched search or upload; only a response echoing it
///   exactly is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// Current top-level mode.
    pub mode: Mode,

    /// The query the displayed (or in-flight) results belong to.
    pub query: String,

    /// Results in backend relevance order. Never re-sorted client-side.
    pub results: Vec<SearchResult>,

    /// The single active banner, if any.
    pub banner: Option<Banner>,

    /// Availability probe outcome. `None` until the probe resolves.
    pub api_reachable: Option<bool>,

    /// Whether the uploader panel is open.
    pub uploader_visible: bool,

    /// The file currently moving through the upload flow.
    pub upload: Option<UploadCandidate>,

    /// Monotonic request counter. Equals the number of the most recently
    /// dispatched search or upload, or one past it right after a reset.
    pub latest_seq: u64,

    /// Whether the one-per-session availability probe was already issued.
    pub probe_issued: bool,
}

impl SessionState {
    /// Creates the initial session state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            query: String::new(),
            results: Vec::new(),
            banner: None,
            api_reachable: None,
            uploader_visible: false,
            upload: None,
            latest_seq: 0,
            probe_issued: false,
        }
    }

    /// Allocates the next request sequence number and records it as latest.
    pub fn next_seq(&mut self) -> u64 {
        self.latest_seq += 1;
        self.latest_seq
    }

    /// Whether a response sequence number no longer matches the latest
    /// dispatched request.
    #[must_use]
    pub const fn is_stale(&self, seq: u64) -> bool {
        seq != self.latest_seq
    }

    /// Replaces the banner with an informational message.
    pub fn set_info_banner(&mut self, message: impl Into<String>) {
        self.banner = Some(Banner {
            kind: BannerKind::Info,
            message: message.into(),
        });
    }

    /// Replaces the banner with an error message.
    pub fn set_error_banner(&mut self, message: impl Into<String>) {
        self.banner = Some(Banner {
            kind: BannerKind::Error,
            message: message.into(),
        });
    }

    /// Resets all user-visible session state.
    ///
    /// The sequence counter is not reset: it advances past every issued
    /// request, so a response still in flight from before the reset can
    /// never match the latest number and is discarded as stale.
    pub fn clear(&mut self) {
        *self = Self {
            latest_seq: self.latest_seq + 1,
            ..Self::new()
        };
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_idle_with_unknown_availability() {
        let state = SessionState::new();
        assert_eq!(state.mode, Mode::Idle);
        assert_eq!(state.api_reachable, None);
        assert!(state.results.is_empty());
        assert!(!state.probe_issued);
        assert_eq!(state.latest_seq, 0);
    }

    #[test]
    fn sequence_numbers_increase_and_gate_staleness() {
        let mut state = SessionState::new();
        let first = state.next_seq();
        let second = state.next_seq();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert!(state.is_stale(first));
        assert!(!state.is_stale(second));
    }

    #[test]
    fn banners_replace_rather_than_stack() {
        let mut state = SessionState::new();
        state.set_error_banner("first");
        state.set_info_banner("second");
        let banner = state.banner.expect("banner");
        assert_eq!(banner.kind, BannerKind::Info);
        assert_eq!(banner.message, "second");
    }

    #[test]
    fn clear_resets_everything_but_the_sequence_counter() {
        let mut state = SessionState::new();
        state.mode = Mode::ShowingError;
        state.query = "budget".to_string();
        state.set_error_banner("boom");
        state.api_reachable = Some(false);
        state.uploader_visible = true;
        let issued = state.next_seq();
        state.probe_issued = true;

        state.clear();
        assert_eq!(
            state,
            SessionState {
                latest_seq: issued + 1,
                ..SessionState::new()
            }
        );
    }

    #[test]
    fn clear_makes_outstanding_requests_stale() {
        let mut state = SessionState::new();
        let issued = state.next_seq();
        assert!(!state.is_stale(issued));

        state.clear();
        assert!(state.is_stale(issued));
    }
}
