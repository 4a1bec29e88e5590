//! HTTP Client port

use std::collections::BTreeMap;

use async_trait::async_trait;
use courier_domain::OutboundRequest;
use thiserror::Error;

/// Raw response handed back by an HTTP client.
///
/// Any status code is a response here; deciding what counts as a failure
/// is left to the use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase, empty when unknown
    pub status_text: String,
    /// Response headers, repeated values joined with ", "
    pub headers: BTreeMap<String, String>,
    /// Undecoded body
    pub body: Vec<u8>,
}

/// Failures where no HTTP response was received.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    Dns {
        /// Host that failed to resolve.
        host: String,
        /// Transport message.
        message: String,
    },

    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The redirect limit was reached.
    #[error("Too many redirects (max {max})")]
    TooManyRedirects {
        /// Configured redirect limit.
        max: usize,
    },

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Anything else the transport reported.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends one request and returns whatever the server answered.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received.
    async fn execute(&self, request: OutboundRequest)
    -> Result<TransportResponse, HttpClientError>;
}
