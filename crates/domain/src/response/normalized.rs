//! The uniform result written into a tab after a send completes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status line, headers and decoded body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// HTTP status code
    pub status: u16,
    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,
    /// Response headers
    pub headers: BTreeMap<String, String>,
    /// Body decoded as JSON, or the raw text when it is not JSON
    pub data: Value,
}

impl ResponseMeta {
    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decodes a response body the way the display expects it.
    ///
    /// JSON bodies become JSON values, anything else becomes a string. An
    /// empty body is the empty string.
    #[must_use]
    pub fn decode_data(body: &[u8]) -> Value {
        if body.is_empty() {
            return Value::String(String::new());
        }
        serde_json::from_slice(body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
    }
}

/// Outcome of one send, as shown to the user.
///
/// Serializes to `{status, statusText, headers, data}` on success and to
/// `{error}` or `{error, status, statusText, headers, data}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedResponse {
    /// The request failed; `response` is present when a server answered.
    Failure {
        /// Human-readable failure message.
        error: String,
        /// Response metadata for HTTP error statuses.
        #[serde(flatten)]
        response: Option<ResponseMeta>,
    },
    /// The server answered with a 2xx status.
    Success(ResponseMeta),
}

impl NormalizedResponse {
    /// Creates a success response.
    #[must_use]
    pub const fn success(meta: ResponseMeta) -> Self {
        Self::Success(meta)
    }

    /// Creates a failure that never reached a server (or never left).
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Failure {
            error: message.into(),
            response: None,
        }
    }

    /// Creates a failure carrying the server's error response.
    #[must_use]
    pub fn http_error(message: impl Into<String>, meta: ResponseMeta) -> Self {
        Self::Failure {
            error: message.into(),
            response: Some(meta),
        }
    }

    /// Returns true for the success shape.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failure { error, .. } => Some(error),
            Self::Success(_) => None,
        }
    }

    /// Returns the response metadata when a server answered.
    #[must_use]
    pub const fn meta(&self) -> Option<&ResponseMeta> {
        match self {
            Self::Success(meta)
            | Self::Failure {
                response: Some(meta),
                ..
            } => Some(meta),
            Self::Failure { response: None, .. } => None,
        }
    }

    /// Returns the HTTP status when a server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.meta().map(|meta| meta.status)
    }

    /// Renders the response as indented JSON for display.
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        // Serializing maps with string keys and JSON values cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn meta(status: u16, status_text: &str, data: Value) -> ResponseMeta {
        ResponseMeta {
            status,
            status_text: status_text.to_string(),
            headers: BTreeMap::new(),
            data,
        }
    }

    #[test]
    fn test_success_shape() {
        let response = NormalizedResponse::success(meta(200, "OK", json!({"ok": true})));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"status": 200, "statusText": "OK", "headers": {}, "data": {"ok": true}})
        );
        assert!(response.is_success());
        assert_eq!(response.error_message(), None);
    }

    #[test]
    fn test_transport_failure_has_no_status() {
        let response = NormalizedResponse::error("connection refused");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"error": "connection refused"}));
        assert!(value.get("status").is_none());
        assert_eq!(response.status(), None);
    }

    #[test]
    fn test_http_failure_carries_status() {
        let response = NormalizedResponse::http_error(
            "Request failed with status code 404",
            meta(404, "Not Found", json!({"message": "missing"})),
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["error"], "Request failed with status code 404");
        assert_eq!(value["status"], 404);
        assert_eq!(value["statusText"], "Not Found");
        assert_eq!(value["data"]["message"], "missing");
        assert_eq!(response.status(), Some(404));
    }

    #[test]
    fn test_deserializes_both_shapes() {
        let failure: NormalizedResponse =
            serde_json::from_value(json!({"error": "boom"})).unwrap();
        assert_eq!(failure, NormalizedResponse::error("boom"));

        let success: NormalizedResponse = serde_json::from_value(
            json!({"status": 201, "statusText": "Created", "headers": {}, "data": ""}),
        )
        .unwrap();
        assert!(success.is_success());
        assert_eq!(success.status(), Some(201));
    }

    #[test]
    fn test_decode_data() {
        assert_eq!(ResponseMeta::decode_data(br#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(ResponseMeta::decode_data(b"plain text"), json!("plain text"));
        assert_eq!(ResponseMeta::decode_data(b""), json!(""));
        assert_eq!(ResponseMeta::decode_data(b"42"), json!(42));
    }

    #[test]
    fn test_status_checks() {
        assert!(meta(204, "No Content", Value::Null).is_success());
        assert!(!meta(301, "Moved Permanently", Value::Null).is_success());
        assert!(!meta(500, "Internal Server Error", Value::Null).is_success());
    }
}
