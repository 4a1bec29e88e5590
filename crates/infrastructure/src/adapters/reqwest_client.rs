//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication for the application.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::error::Error as _;

use async_trait::async_trait;
use courier_application::ports::{HttpClient, HttpClientError, TransportResponse};
use courier_domain::{HttpMethod, OutboundRequest};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Url};
use tracing::debug;

use super::ClientSettings;

/// HTTP client implementation using reqwest.
///
/// Every status code is returned as a response; only failures where no
/// response arrived become `HttpClientError`s.
pub struct ReqwestHttpClient {
    client: Client,
    max_redirects: usize,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_settings(&ClientSettings::default())
    }

    /// Creates a new HTTP client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend or resolver cannot be initialized.
    pub fn with_settings(settings: &ClientSettings) -> Result<Self, HttpClientError> {
        let mut builder = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects));
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HttpClientError::Other(describe(&e)))?;

        Ok(Self {
            client,
            max_redirects: settings.max_redirects,
        })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(&self, error: &reqwest::Error) -> HttpClientError {
        let message = describe(error);

        if error.is_timeout() {
            return HttpClientError::Timeout(message);
        }

        if error.is_connect() {
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") || lower.contains("lookup") {
                let host = error
                    .url()
                    .and_then(Url::host_str)
                    .unwrap_or("unknown")
                    .to_string();
                return HttpClientError::Dns { host, message };
            }
            return HttpClientError::Connect(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects {
                max: self.max_redirects,
            };
        }

        if error.is_body() || error.is_decode() {
            return HttpClientError::Body(message);
        }

        HttpClientError::Other(message)
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(
        &self,
        request: OutboundRequest,
    ) -> Result<TransportResponse, HttpClientError> {
        let url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        // Adds Content-Type: application/json unless a header already set one
        builder = builder.json(&request.body);

        let response = builder.send().await.map_err(|e| self.map_error(&e))?;

        let status = response.status();
        let headers = collect_headers(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Body(describe(&e)))?
            .to_vec();

        debug!(status = status.as_u16(), bytes = body.len(), "response body read");

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

/// Flattens a header map, joining repeated names with ", ".
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        match collected.entry(name.as_str().to_string()) {
            Entry::Occupied(mut entry) => {
                let existing: &mut String = entry.get_mut();
                existing.push_str(", ");
                existing.push_str(&value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value.into_owned());
            }
        }
    }
    collected
}

/// Renders an error together with its source chain.
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Put),
            Method::PUT
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_client_creation() {
        let client = ReqwestHttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_with_settings_keeps_redirect_limit() {
        let settings = ClientSettings {
            max_redirects: 3,
            ..ClientSettings::default()
        };

        let client = ReqwestHttpClient::with_settings(&settings).unwrap();

        assert_eq!(client.max_redirects, 3);
    }

    #[test]
    fn test_collect_headers_joins_repeats() {
        let mut headers = HeaderMap::new();
        headers.append("x-multi", HeaderValue::from_static("a"));
        headers.append("x-multi", HeaderValue::from_static("b"));
        headers.insert("content-type", HeaderValue::from_static("text/plain"));

        let collected = collect_headers(&headers);

        assert_eq!(
            collected,
            BTreeMap::from([
                ("content-type".to_string(), "text/plain".to_string()),
                ("x-multi".to_string(), "a, b".to_string()),
            ])
        );
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_sending() {
        let client = ReqwestHttpClient::new().unwrap();
        let request = OutboundRequest {
            method: HttpMethod::Get,
            url: "not a url".to_string(),
            headers: BTreeMap::new(),
            body: serde_json::json!({}),
        };

        let err = client.execute(request).await.unwrap_err();

        assert!(matches!(err, HttpClientError::InvalidUrl(ref m) if m.ends_with("not a url")));
    }
}
