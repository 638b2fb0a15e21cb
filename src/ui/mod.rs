//! Presentation adapter: pure conversion of session state to view models.
//!
//! Nothing here performs I/O or mutates state. Hosts call
//! [`compute_viewmodel`](crate::app::state::SessionState::compute_viewmodel)
//! after every handled event and render the returned model.

pub mod helpers;
pub mod viewmodel;

pub use helpers::{format_file_size, truncate};
pub use viewmodel::{BannerView, ResultView, ResultsViewModel, UploadView};
