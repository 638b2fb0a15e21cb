//! Session modes and banner kinds.

use serde::{Deserialize, Serialize};

/// The session's top-level mode.
///
/// Exactly one mode is active at a time. `Searching` and `Uploading` are the
/// busy modes; the orchestrator never allows both flows in flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// No search issued yet, or state was explicitly cleared.
    Idle,

    /// A search request is in flight.
    Searching,

    /// An upload (and its chained follow-up search) is in flight.
    Uploading,

    /// A search resolved; results (possibly zero) are displayed.
    ShowingResults,

    /// The most recent search or upload failed.
    ShowingError,
}

impl Mode {
    /// Whether a transport flow is currently in flight.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Searching | Self::Uploading)
    }
}

/// Severity of the single session banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerKind {
    /// Informational notice, such as an empty result set.
    Info,

    /// A failure the user should act on.
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_modes_are_busy() {
        assert!(Mode::Searching.is_busy());
        assert!(Mode::Uploading.is_busy());
        assert!(!Mode::Idle.is_busy());
        assert!(!Mode::ShowingResults.is_busy());
        assert!(!Mode::ShowingError.is_busy());
    }
}
