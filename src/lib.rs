//! Baheth client core: search/upload orchestration for a document-search
//! service.
//!
//! This crate implements the logic of a document-search client:
//! - Search and upload orchestration with race-free state transitions
//! - Normalization of heterogeneous backend payloads into canonical results
//! - A blocking HTTP transport client behind a swappable backend seam
//! - Pure view-model computation for the rendering host

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Rendering Host (external)                          │  ← Input + render
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Single writer
//! │  - Action dispatching                               │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌───────────────────────────────┐
//! │ UI Layer      │   │ Worker Layer (worker/)        │
//! │ (ui/)         │   │ - Request/response protocol   │
//! │ - View models │   │ - Sequence-numbered dispatch  │
//! │ - Formatting  │   │ - Channel-driven run loop     │
//! └───────────────┘   └───────────────────────────────┘
//!                                      │
//! ┌─────────────────────────────────────────────────────┐
//! │  Transport Layer (transport/)                       │
//! │  - SearchBackend seam + blocking HTTP client        │
//! │  - Response normalization                           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Observability                             │
//! │  - Result/upload types, errors (domain/)            │
//! │  - Tracing with file span export (observability/)   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Session state machine with event/action model
//! - [`domain`]: Core types (results, upload flow, errors)
//! - [`transport`]: HTTP client and response normalizer
//! - [`worker`]: Background executor for transport requests
//! - [`ui`]: View-model computation and text formatting
//! - `observability`: Tracing with file-based span export
//!
//! # Control Flow
//!
//! 1. The host feeds a user intent into [`handle_event`]
//! 2. The orchestrator mutates [`SessionState`] and returns [`Action`]s
//! 3. `Action::Dispatch` requests go to the transport worker
//! 4. Worker responses come back as [`Event::TransportResponse`]
//! 5. The host renders [`SessionState::compute_viewmodel`]
//!
//! # Example
//!
//! ```rust
//! use baheth_client::{handle_event, initialize, Config, Event};
//!
//! let config = Config::default();
//! let mut state = initialize(&config);
//!
//! let (_redraw, actions) =
//!     handle_event(&mut state, Event::SubmitSearch("annual report".to_string()))?;
//! // Hand each Action::Dispatch to the transport worker...
//! let model = state.compute_viewmodel();
//! assert!(model.is_loading);
//! # Ok::<(), baheth_client::BahethError>(())
//! ```

pub mod app;
pub mod domain;
pub mod transport;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, Mode, SessionState};
pub use domain::{BahethError, FileCategory, Result, SearchResult};
pub use ui::ResultsViewModel;

use serde::Deserialize;

fn default_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

/// Client configuration, loaded from TOML or built in code.
///
/// # Example
///
/// ```toml
/// base_url = "http://localhost:8000/api/v1"
/// request_timeout_secs = 30
/// trace_level = "debug"
/// trace_file = "/tmp/baheth-traces.jsonl"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the search service API, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout in seconds. A request that exceeds it resolves
    /// as a timeout failure rather than parking the session forever.
    pub request_timeout_secs: u64,

    /// Tracing level filter. Options: `trace`, `debug`, `info`, `warn`,
    /// `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Path to the span export file. Span export is disabled when unset.
    pub trace_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid TOML.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| BahethError::Config(e.to_string()))
    }
}

/// Initializes the client with configuration.
///
/// Sets up the tracing subscriber and returns a fresh session state ready
/// for event processing. Call once per page session.
#[must_use]
pub fn initialize(config: &Config) -> SessionState {
    observability::init_tracing(config);
    tracing::debug!(base_url = %config.base_url, "initializing baheth client");
    SessionState::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_points_at_the_local_service() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.trace_level, None);
        assert_eq!(config.trace_file, None);
    }

    #[test]
    fn config_loads_from_toml_with_partial_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"https://search.example.com/api/v1\"").unwrap();
        writeln!(file, "trace_level = \"debug\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://search.example.com/api/v1");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn config_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = [not toml").unwrap();

        let error = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(error, BahethError::Config(_)));
    }

    #[test]
    fn initialize_returns_the_initial_state() {
        let state = initialize(&Config::default());
        assert_eq!(state, SessionState::new());
    }
}
