//! Error types for the Baheth search client.
//!
//! This module defines the centralized error type [`BahethError`] and a type alias
//! [`Result`] for convenient error handling throughout the client. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for Baheth client operations.
///
/// This enum consolidates all error conditions that can occur while driving the
/// client, from transport failures to configuration problems. The taxonomy
/// distinguishes a failed network call from a successful call that legitimately
/// returned zero results: the latter is never an error.
#[derive(Debug, Error)]
pub enum BahethError {
    /// A network call did not complete successfully.
    ///
    /// Covers connection failures and non-2xx HTTP responses. The status code
    /// is present when the server answered at all, absent for failures below
    /// the HTTP layer.
    #[error("Transport error: {message}")]
    Transport {
        /// HTTP status code, when the server produced a response.
        status_code: Option<u16>,
        /// Description of what went wrong.
        message: String,
    },

    /// A network call exceeded the configured request timeout.
    ///
    /// Kept separate from [`BahethError::Transport`] so the orchestrator can
    /// surface a distinct message for calls that never resolved.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Input was rejected by a local guard before any transport call.
    ///
    /// Blank queries and invalid upload candidates fall here. Blank-query
    /// validation is suppressed locally and never surfaced as a user-visible
    /// error banner.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Communication with the transport worker failed.
    ///
    /// The string contains details about the communication failure.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Baheth client operations.
///
/// This is a type alias for `std::result::Result<T, BahethError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, BahethError>;
