//! Domain layer for the Baheth search client.
//!
//! This module contains the core domain types and business rules of the client,
//! independent of transport or presentation concerns. It follows domain-driven
//! design principles by keeping the canonical result model isolated from
//! external dependencies.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`result`]: Canonical search result records, file categories, and upload types

pub mod error;
pub mod result;

pub use error::{BahethError, Result};
pub use result::{FileCategory, SearchResult, UploadCandidate, UploadReceipt};
