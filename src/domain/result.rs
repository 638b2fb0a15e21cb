//! Canonical search result records and upload domain types.
//!
//! This module defines the backend-independent representation of one matched
//! document ([`SearchResult`]), the derived file category enum, and the types
//! owned by the upload flow. Result ordering is the relevance order returned by
//! the backend; the client never re-sorts a result set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// File category derived from a document title's extension.
///
/// The category is computed from the substring after the last `.` in the
/// title, case-insensitively. Office-suite sibling extensions collapse into
/// one category (`docx` into `Doc`, `pptx` into `Ppt`, `xlsx` into `Xls`).
/// Titles without a recognized extension map to [`FileCategory::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Pdf,
    Doc,
    Txt,
    Ppt,
    Xls,
    Csv,
    Unknown,
}

impl FileCategory {
    /// Derives the file category from a document title.
    ///
    /// Only the substring after the *last* `.` is considered, so
    /// `archive.2024.pdf` is a PDF. A title with no `.` at all, or with an
    /// unrecognized extension, yields [`FileCategory::Unknown`].
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        let Some((_, extension)) = title.rsplit_once('.') else {
            return Self::Unknown;
        };
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "doc" | "docx" => Self::Doc,
            "txt" => Self::Txt,
            "ppt" | "pptx" => Self::Ppt,
            "xls" | "xlsx" => Self::Xls,
            "csv" => Self::Csv,
            _ => Self::Unknown,
        }
    }

    /// Returns the lowercase label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Doc => "doc",
            Self::Txt => "txt",
            Self::Ppt => "ppt",
            Self::Xls => "xls",
            Self::Csv => "csv",
            Self::Unknown => "unknown",
        }
    }
}

/// Canonical, backend-independent representation of one matched document.
///
/// Produced by the response normalizer from whatever shape the backend
/// returned. `id` is unique within a single result set (1-based position);
/// it is stable for a given response but not guaranteed stable across
/// repeated identical queries if backend ordering varies.
///
/// The backend currently supplies titles only; `excerpt`, `match_count`,
/// `last_modified`, and `size_label` are placeholder-derived and should be
/// replaced with authoritative fields once the backend returns them. The
/// fallback derivation must be preserved either way so the UI stays resilient
/// to partial responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Unique identifier within one result set.
    pub id: String,

    /// Document title as returned by the backend.
    pub title: String,

    /// Category derived from the title's extension.
    pub file_category: FileCategory,

    /// Short matched-context text shown under the title.
    pub excerpt: String,

    /// Number of query matches within the document.
    pub match_count: u32,

    /// Calendar date of the document's last modification.
    pub last_modified: NaiveDate,

    /// Human-readable file size (e.g. `1.2 MB`).
    pub size_label: String,
}

/// A file selected by the user for upload.
///
/// Created when a user selects or drops a file; dropped when the upload flow
/// ends or the candidate is superseded by a new selection. Owned exclusively
/// by the upload flow and never shared with the search-results state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCandidate {
    /// Client-assigned identifier for this selection.
    pub id: String,

    /// Original file name, including extension.
    pub name: String,

    /// File size in bytes.
    pub byte_size: u64,

    /// MIME type reported by the selection source.
    pub mime_type: String,
}

impl UploadCandidate {
    /// Creates a new upload candidate for a selected file.
    ///
    /// The `id` is derived from the selection time; it only needs to be
    /// unique within a session, not globally.
    #[must_use]
    pub fn new(name: String, byte_size: u64, mime_type: String) -> Self {
        let id = format!("{:x}", chrono::Utc::now().timestamp_millis());
        Self {
            id,
            name,
            byte_size,
            mime_type,
        }
    }

    /// Returns the category implied by the candidate's file name.
    #[must_use]
    pub fn category(&self) -> FileCategory {
        FileCategory::from_title(&self.name)
    }
}

/// Server acknowledgment of a completed upload.
///
/// The wire response uses the field name `hashed_key` for the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Server-side storage key for the uploaded document.
    #[serde(rename = "hashed_key")]
    pub storage_key: String,

    /// Title the server indexed the document under.
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_common_extensions() {
        assert_eq!(FileCategory::from_title("report.pdf"), FileCategory::Pdf);
        assert_eq!(FileCategory::from_title("notes.txt"), FileCategory::Txt);
        assert_eq!(FileCategory::from_title("deck.ppt"), FileCategory::Ppt);
        assert_eq!(FileCategory::from_title("table.csv"), FileCategory::Csv);
    }

    #[test]
    fn category_collapses_office_siblings() {
        assert_eq!(FileCategory::from_title("spec.docx"), FileCategory::Doc);
        assert_eq!(FileCategory::from_title("spec.doc"), FileCategory::Doc);
        assert_eq!(FileCategory::from_title("deck.pptx"), FileCategory::Ppt);
        assert_eq!(FileCategory::from_title("sheet.xlsx"), FileCategory::Xls);
    }

    #[test]
    fn category_is_case_insensitive() {
        assert_eq!(FileCategory::from_title("REPORT.PDF"), FileCategory::Pdf);
        assert_eq!(FileCategory::from_title("Sheet.Xls"), FileCategory::Xls);
    }

    #[test]
    fn category_uses_last_dot_only() {
        assert_eq!(
            FileCategory::from_title("archive.2024.pdf"),
            FileCategory::Pdf
        );
    }

    #[test]
    fn category_unknown_without_extension() {
        assert_eq!(FileCategory::from_title("README"), FileCategory::Unknown);
        assert_eq!(FileCategory::from_title("trailing."), FileCategory::Unknown);
        assert_eq!(FileCategory::from_title("image.jpeg"), FileCategory::Unknown);
    }

    #[test]
    fn upload_candidate_carries_selection_metadata() {
        let candidate =
            UploadCandidate::new("report.pdf".to_string(), 2048, "application/pdf".to_string());
        assert_eq!(candidate.name, "report.pdf");
        assert_eq!(candidate.byte_size, 2048);
        assert_eq!(candidate.mime_type, "application/pdf");
        assert_eq!(candidate.category(), FileCategory::Pdf);
        assert!(!candidate.id.is_empty());
    }

    #[test]
    fn upload_receipt_reads_hashed_key_field() {
        let receipt: UploadReceipt =
            serde_json::from_str(r#"{"hashed_key": "abc123", "title": "report.pdf"}"#)
                .expect("receipt should deserialize");
        assert_eq!(receipt.storage_key, "abc123");
        assert_eq!(receipt.title, "report.pdf");
    }
}
