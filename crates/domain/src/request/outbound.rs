//! The concrete request dispatched for a tab.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::{HttpMethod, RequestDraft};

/// Header name used for bearer token injection.
pub const AUTHORIZATION: &str = "Authorization";

/// Reasons a draft cannot be turned into a request.
///
/// These are reported in the tab's response like any transport failure.
#[derive(Debug, Error)]
pub enum RequestBuildError {
    /// The header text is not valid JSON.
    #[error("invalid headers JSON: {0}")]
    HeadersJson(#[source] serde_json::Error),

    /// The header text is valid JSON but not an object.
    #[error("headers must be a JSON object, found {0}")]
    HeadersNotObject(&'static str),

    /// A header value is an array or object.
    #[error("header '{name}' must be a string, number or boolean, found {kind}")]
    HeaderValue {
        /// Offending header name.
        name: String,
        /// JSON type found instead.
        kind: &'static str,
    },

    /// The body text is not valid JSON.
    #[error("invalid body JSON: {0}")]
    BodyJson(#[source] serde_json::Error),
}

/// A fully built request, ready for the HTTP client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// URL exactly as typed.
    pub url: String,
    /// Header names and values.
    pub headers: BTreeMap<String, String>,
    /// JSON payload. Present for every method, GET included.
    pub body: Value,
}

impl OutboundRequest {
    /// Builds the request for a draft.
    ///
    /// Empty header or body text stands for `{}`. A non-blank bearer token
    /// replaces any `Authorization` header, whatever its casing.
    ///
    /// # Errors
    ///
    /// Returns `RequestBuildError` when the header or body text is not
    /// acceptable JSON.
    pub fn from_draft(draft: &RequestDraft) -> Result<Self, RequestBuildError> {
        let headers_value =
            parse_or_empty_object(&draft.headers).map_err(RequestBuildError::HeadersJson)?;
        let mut headers = header_map(headers_value)?;
        let body = parse_or_empty_object(&draft.body).map_err(RequestBuildError::BodyJson)?;

        if let Some(token) = draft.bearer_token() {
            headers.retain(|name, _| !name.eq_ignore_ascii_case(AUTHORIZATION));
            headers.insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
        }

        Ok(Self {
            method: draft.method,
            url: draft.url.clone(),
            headers,
            body,
        })
    }

    /// Returns the value of a header, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

fn parse_or_empty_object(text: &str) -> serde_json::Result<Value> {
    if text.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(text)
}

fn header_map(value: Value) -> Result<BTreeMap<String, String>, RequestBuildError> {
    let Value::Object(entries) = value else {
        return Err(RequestBuildError::HeadersNotObject(json_kind(&value)));
    };

    let mut headers = BTreeMap::new();
    for (name, value) in entries {
        let kind = json_kind(&value);
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            // null entries are dropped
            Value::Null => continue,
            Value::Array(_) | Value::Object(_) => {
                return Err(RequestBuildError::HeaderValue { name, kind });
            }
        };
        headers.insert(name, text);
    }
    Ok(headers)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
