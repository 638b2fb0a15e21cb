//! View-model types for the presentation layer.
//!
//! The adapter here is pure: it reads session state and result records and
//! produces display-ready strings. It has no failure modes and no side
//! effects, and it never reorders results away from backend relevance order.

use crate::app::modes::{BannerKind, Mode};
use crate::app::state::SessionState;
use crate::domain::{FileCategory, SearchResult};
use crate::ui::helpers::{format_file_size, truncate};
use serde::Serialize;

/// Maximum characters a result title occupies before truncation.
const MAX_TITLE_CHARS: usize = 80;

/// Maximum characters a result excerpt occupies before truncation.
const MAX_EXCERPT_CHARS: usize = 160;

/// Notice shown while the availability probe has reported the service down.
const UNAVAILABLE_NOTICE: &str = "API is unavailable. Please check your backend server.";

/// Display form of a single search result.
///
/// Identity fields (`id`, `file_category`, `match_count`) pass through
/// unchanged from the result record; only text is truncated and the date
/// formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    /// Stable identifier, unchanged from the result record.
    pub id: String,

    /// Display title, truncated when long.
    pub title: String,

    /// File category, unchanged from the result record.
    pub file_category: FileCategory,

    /// Excerpt text, truncated when long.
    pub excerpt: String,

    /// Match count, unchanged from the result record.
    pub match_count: u32,

    /// Last-modified date formatted as `YYYY-MM-DD`.
    pub last_modified: String,

    /// Human-readable size label.
    pub size_label: String,
}

impl ResultView {
    /// Builds the display form of a result record.
    #[must_use]
    pub fn from_result(result: &SearchResult) -> Self {
        Self {
            id: result.id.clone(),
            title: truncate(&result.title, MAX_TITLE_CHARS),
            file_category: result.file_category,
            excerpt: truncate(&result.excerpt, MAX_EXCERPT_CHARS),
            match_count: result.match_count,
            last_modified: result.last_modified.format("%Y-%m-%d").to_string(),
            size_label: result.size_label.clone(),
        }
    }
}

/// Display form of the session banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerView {
    /// Whether the banner reports an error or plain information.
    pub kind: BannerKind,

    /// Banner text.
    pub message: String,
}

/// Display form of the in-progress upload, shown in the uploader panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadView {
    /// File name as selected.
    pub name: String,

    /// Human-readable size of the selected file.
    pub size_label: String,
}

/// Complete view model for the results surface.
///
/// Assembled by [`SessionState::compute_viewmodel`]; hosts render it directly
/// without consulting session state again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsViewModel {
    /// Heading above the result list.
    pub heading: String,

    /// Result rows. Populated only when results are being shown.
    pub items: Vec<ResultView>,

    /// The single active banner, if any.
    pub banner: Option<BannerView>,

    /// Whether the uploader panel is open.
    pub uploader_visible: bool,

    /// Preview of the file currently uploading, if any.
    pub upload: Option<UploadView>,

    /// Persistent notice when the availability probe reported the service
    /// unreachable. `None` while unknown or reachable.
    pub availability_notice: Option<String>,

    /// Whether a search or upload is in flight.
    pub is_loading: bool,
}

impl SessionState {
    /// Computes the display model for the current session state.
    ///
    /// Pure read: calling this never mutates state, and calling it twice in
    /// a row yields equal view models.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ResultsViewModel {
        let heading = match self.mode {
            Mode::Searching => "Searching...".to_string(),
            Mode::ShowingResults => format!("{} results found", self.results.len()),
            Mode::Uploading => "Uploading...".to_string(),
            Mode::Idle | Mode::ShowingError => String::new(),
        };

        let items = if self.mode == Mode::ShowingResults {
            self.results.iter().map(ResultView::from_result).collect()
        } else {
            Vec::new()
        };

        ResultsViewModel {
            heading,
            items,
            banner: self.banner.as_ref().map(|banner| BannerView {
                kind: banner.kind,
                message: banner.message.clone(),
            }),
            uploader_visible: self.uploader_visible,
            upload: self.upload.as_ref().map(|candidate| UploadView {
                name: candidate.name.clone(),
                size_label: format_file_size(candidate.byte_size),
            }),
            availability_notice: match self.api_reachable {
                Some(false) => Some(UNAVAILABLE_NOTICE.to_string()),
                Some(true) | None => None,
            },
            is_loading: self.mode.is_busy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UploadCandidate;
    use chrono::NaiveDate;

    fn sample_result(title: &str, excerpt: &str) -> SearchResult {
        SearchResult {
            id: "1".to_string(),
            title: title.to_string(),
            file_category: FileCategory::Pdf,
            excerpt: excerpt.to_string(),
            match_count: 4,
            last_modified: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            size_label: "1.2 MB".to_string(),
        }
    }

    #[test]
    fn view_preserves_identity_fields() {
        let result = sample_result("quarterly-report.pdf", "Matched result...");
        let view = ResultView::from_result(&result);
        assert_eq!(view.id, "1");
        assert_eq!(view.file_category, FileCategory::Pdf);
        assert_eq!(view.match_count, 4);
        assert_eq!(view.last_modified, "2024-03-15");
    }

    #[test]
    fn view_truncates_long_text_only() {
        let long_title = "t".repeat(120);
        let long_excerpt = "e".repeat(300);
        let view = ResultView::from_result(&sample_result(&long_title, &long_excerpt));
        assert_eq!(view.title.chars().count(), 80);
        assert!(view.title.ends_with("..."));
        assert_eq!(view.excerpt.chars().count(), 160);

        let short = ResultView::from_result(&sample_result("short.pdf", "brief"));
        assert_eq!(short.title, "short.pdf");
        assert_eq!(short.excerpt, "brief");
    }

    #[test]
    fn viewmodel_is_loading_tracks_busy_modes() {
        let mut state = SessionState::new();
        assert!(!state.compute_viewmodel().is_loading);

        state.mode = Mode::Searching;
        let model = state.compute_viewmodel();
        assert!(model.is_loading);
        assert_eq!(model.heading, "Searching...");
        assert!(model.items.is_empty());
    }

    #[test]
    fn viewmodel_counts_results_in_heading() {
        let mut state = SessionState::new();
        state.mode = Mode::ShowingResults;
        state.results = vec![
            sample_result("a.pdf", "x"),
            sample_result("b.txt", "y"),
            sample_result("c.docx", "z"),
        ];
        let model = state.compute_viewmodel();
        assert_eq!(model.heading, "3 results found");
        assert_eq!(model.items.len(), 3);
    }

    #[test]
    fn viewmodel_hides_items_outside_showing_results() {
        let mut state = SessionState::new();
        state.mode = Mode::ShowingError;
        state.results = vec![sample_result("a.pdf", "x")];
        assert!(state.compute_viewmodel().items.is_empty());
    }

    #[test]
    fn availability_notice_appears_only_when_unreachable() {
        let mut state = SessionState::new();
        assert_eq!(state.compute_viewmodel().availability_notice, None);

        state.api_reachable = Some(true);
        assert_eq!(state.compute_viewmodel().availability_notice, None);

        state.api_reachable = Some(false);
        assert_eq!(
            state.compute_viewmodel().availability_notice.as_deref(),
            Some("API is unavailable. Please check your backend server.")
        );
    }

    #[test]
    fn upload_preview_formats_size() {
        let mut state = SessionState::new();
        state.upload = Some(UploadCandidate::new(
            "slides.pptx".to_string(),
            1536,
            "application/vnd.ms-powerpoint".to_string(),
        ));
        let model = state.compute_viewmodel();
        let upload = model.upload.expect("upload preview");
        assert_eq!(upload.name, "slides.pptx");
        assert_eq!(upload.size_label, "1.5 KB");
    }

    #[test]
    fn compute_is_idempotent() {
        let mut state = SessionState::new();
        state.mode = Mode::ShowingResults;
        state.results = vec![sample_result("a.pdf", "x")];
        assert_eq!(state.compute_viewmodel(), state.compute_viewmodel());
    }
}
