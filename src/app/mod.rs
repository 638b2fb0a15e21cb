//! Application orchestrator: session state and event handling.
//!
//! This is the single writer for [`SessionState`]. Hosts feed user intents
//! and transport responses through [`handle_event`] and carry out the
//! returned [`Action`]s; everything else in the crate is read-only with
//! respect to session state.
//!
//! # Architecture
//!
//! - `state`: The [`SessionState`] container and its banner type
//! - `modes`: The [`Mode`](modes::Mode) state machine and banner kinds
//! - `handler`: [`Event`] definitions and the transition logic
//! - `actions`: Side effects the host performs on the orchestrator's behalf

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event, MAX_UPLOAD_BYTES};
pub use modes::{BannerKind, Mode};
pub use state::{Banner, SessionState};
