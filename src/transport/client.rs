//! Transport client for the remote search service.
//!
//! This module defines the [`SearchBackend`] trait that abstracts the remote
//! search service, and [`HttpBackend`], the blocking HTTP implementation used
//! in production. The trait is the seam at which tests substitute canned
//! backends without any network.
//!
//! # Contract
//!
//! The three operations fail independently. A successful call that returns
//! zero results is *not* a failure; the orchestrator distinguishes empty
//! result sets from transport errors. `check_availability` is the one
//! operation with swallow-and-convert semantics: unavailability is expected
//! steady-state information, not an exceptional condition, so any failure is
//! caught internally and reported as `false`.
//!
//! All operations log request/response metadata for diagnostics. That logging
//! is a side effect only and never part of the contract observed by callers.

use crate::domain::{BahethError, Result, SearchResult, UploadCandidate, UploadReceipt};
use crate::transport::normalize::normalize;
use crate::Config;
use reqwest::blocking::{multipart, Client};
use serde_json::Value;
use std::time::Duration;

/// Abstraction over the remote search service.
///
/// Implementations must be safe to hand to the transport worker. The
/// production implementation is [`HttpBackend`]; tests provide stubs.
pub trait SearchBackend: Send {
    /// Searches the index and returns normalized results in relevance order.
    ///
    /// # Errors
    ///
    /// Returns a transport or timeout error when the request does not
    /// complete with a 2xx status. An empty result set is `Ok(vec![])`.
    fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Uploads a document for indexing and returns the server's receipt.
    ///
    /// Does not trigger a follow-up search; that sequencing belongs to the
    /// orchestrator.
    ///
    /// # Errors
    ///
    /// Returns a transport or timeout error when the request fails.
    fn upload(&self, candidate: &UploadCandidate, bytes: Vec<u8>) -> Result<UploadReceipt>;

    /// Probes service liveness. Never fails: any error is reported as `false`.
    fn check_availability(&self) -> bool;
}

/// Blocking HTTP implementation of [`SearchBackend`].
///
/// Issues requests against a fixed base path (`{base}/query`,
/// `{base}/files/upload`, `{base}/`). Responses with a non-JSON body are
/// normalized to zero results rather than failing, keeping the UI resilient
/// to partial backend behavior.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Builds an HTTP backend from the client configuration.
    ///
    /// The underlying client carries a `baheth-client/<version>` user agent
    /// and the configured request timeout. A trailing `/` on the base URL is
    /// stripped so path concatenation stays predictable.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let user_agent = format!("baheth-client/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| BahethError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Classifies a reqwest failure into the client error taxonomy.
    ///
    /// Timeouts get their own variant so the orchestrator can surface a
    /// distinct message; everything else is a transport error carrying the
    /// status code when one exists.
    fn classify(error: &reqwest::Error) -> BahethError {
        if error.is_timeout() {
            BahethError::Timeout(error.to_string())
        } else {
            BahethError::Transport {
                status_code: error.status().map(|status| status.as_u16()),
                message: error.to_string(),
            }
        }
    }
}

impl SearchBackend for HttpBackend {
    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!(
            "{}/query?query={}",
            self.base_url,
            urlencoding::encode(query)
        );
        tracing::debug!(url = %url, "issuing search request");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Self::classify(&e))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "search response received");

        if !status.is_success() {
            return Err(BahethError::Transport {
                status_code: Some(status.as_u16()),
                message: format!("search request returned {status}"),
            });
        }

        // A body that isn't JSON is treated as an unrecognized shape, which
        // normalizes to zero results.
        let payload: Value = response.json().unwrap_or(Value::Null);
        let results = normalize(&payload, query);
        tracing::debug!(result_count = results.len(), "search response normalized");
        Ok(results)
    }

    fn upload(&self, candidate: &UploadCandidate, bytes: Vec<u8>) -> Result<UploadReceipt> {
        let url = format!("{}/files/upload", self.base_url);
        tracing::debug!(
            url = %url,
            file_name = %candidate.name,
            byte_size = candidate.byte_size,
            "issuing upload request"
        );

        let part = multipart::Part::bytes(bytes)
            .file_name(candidate.name.clone())
            .mime_str(&candidate.mime_type)
            .map_err(|e| {
                BahethError::Validation(format!(
                    "invalid mime type {:?}: {e}",
                    candidate.mime_type
                ))
            })?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| Self::classify(&e))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "upload response received");

        if !status.is_success() {
            return Err(BahethError::Transport {
                status_code: Some(status.as_u16()),
                message: format!("upload request returned {status}"),
            });
        }

        response.json::<UploadReceipt>().map_err(|e| {
            BahethError::Transport {
                status_code: None,
                message: format!("failed to parse upload response: {e}"),
            }
        })
    }

    fn check_availability(&self) -> bool {
        let url = format!("{}/", self.base_url);
        tracing::debug!(url = %url, "issuing availability probe");

        match self.client.get(&url).send() {
            Ok(response) => {
                let reachable = response.status().is_success();
                tracing::debug!(
                    status = response.status().as_u16(),
                    reachable = reachable,
                    "availability probe completed"
                );
                reachable
            }
            Err(e) => {
                tracing::debug!(error = %e, "availability probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let config = Config {
            base_url: "http://localhost:8000/api/v1/".to_string(),
            ..Config::default()
        };
        let backend = HttpBackend::new(&config).expect("backend should build");
        assert_eq!(backend.base_url, "http://localhost:8000/api/v1");
    }

    #[test]
    fn default_config_builds_a_backend() {
        let backend = HttpBackend::new(&Config::default()).expect("backend should build");
        assert_eq!(backend.base_url, "http://localhost:8000/api/v1");
    }
}
