//! The editable request fields of a tab.

use serde::{Deserialize, Serialize};

use super::HttpMethod;

/// Request fields exactly as the user typed them.
///
/// Nothing here is validated; `headers` and `body` are only parsed as JSON
/// when the request is built for sending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDraft {
    /// HTTP method.
    pub method: HttpMethod,
    /// Target URL.
    pub url: String,
    /// Header text, expected to be a JSON object. Empty means `{}`.
    pub headers: String,
    /// Body text, expected to be a JSON value. Empty means `{}`.
    pub body: String,
    /// Raw bearer token. Empty means no token.
    pub bearer_token: String,
}

impl RequestDraft {
    /// Returns true if the URL is blank after trimming.
    #[must_use]
    pub fn url_is_blank(&self) -> bool {
        self.url.trim().is_empty()
    }

    /// Returns the raw token when it is not blank.
    ///
    /// The token is returned untrimmed; blankness is judged on the trimmed
    /// text only.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        (!self.bearer_token.trim().is_empty()).then_some(self.bearer_token.as_str())
    }
}
