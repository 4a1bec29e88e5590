//! Request tabs and the store that owns them.

mod store;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{DomainError, DomainResult};
use crate::id::TabId;
use crate::request::{HttpMethod, RequestDraft};
use crate::response::NormalizedResponse;

pub use store::{SendOutcome, SendTicket, TabStore};

/// One request-in-progress and the last response it received.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    id: TabId,
    /// The editable request fields.
    #[serde(flatten)]
    pub request: RequestDraft,
    /// Whether the token field is shown. Has no effect on sends.
    pub show_bearer_token_input: bool,
    /// Outcome of the last committed send.
    pub response: Option<NormalizedResponse>,
    #[serde(skip)]
    latest_send: u64,
}

impl Tab {
    /// Creates a tab with default fields and no response.
    #[must_use]
    pub fn new(id: TabId) -> Self {
        Self {
            id,
            request: RequestDraft::default(),
            show_bearer_token_input: false,
            response: None,
            latest_send: 0,
        }
    }

    /// Returns the tab id.
    #[must_use]
    pub const fn id(&self) -> TabId {
        self.id
    }

    /// Returns the sequence number of the most recently started send.
    ///
    /// Zero means nothing was ever sent from this tab.
    #[must_use]
    pub const fn latest_send(&self) -> u64 {
        self.latest_send
    }

    /// Returns true once any send has completed.
    #[must_use]
    pub const fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Replaces one request field.
    pub fn apply(&mut self, edit: TabEdit) {
        match edit {
            TabEdit::Method(method) => self.request.method = method,
            TabEdit::Url(url) => self.request.url = url,
            TabEdit::Headers(headers) => self.request.headers = headers,
            TabEdit::Body(body) => self.request.body = body,
            TabEdit::BearerToken(token) => self.request.bearer_token = token,
        }
    }
}

/// Names of the editable request fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabField {
    /// HTTP method.
    Method,
    /// Target URL.
    Url,
    /// Header JSON text.
    Headers,
    /// Body JSON text.
    Body,
    /// Bearer token.
    BearerToken,
}

impl TabField {
    /// Returns the field name used in serialized tabs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Url => "url",
            Self::Headers => "headers",
            Self::Body => "body",
            Self::BearerToken => "bearerToken",
        }
    }
}

impl fmt::Display for TabField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TabField {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim() {
            "method" => Ok(Self::Method),
            "url" => Ok(Self::Url),
            "headers" => Ok(Self::Headers),
            "body" => Ok(Self::Body),
            "bearerToken" | "bearer_token" | "token" => Ok(Self::BearerToken),
            other => Err(DomainError::UnknownField(other.to_string())),
        }
    }
}

/// A new value for one request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEdit {
    /// New HTTP method.
    Method(HttpMethod),
    /// New URL.
    Url(String),
    /// New header text.
    Headers(String),
    /// New body text.
    Body(String),
    /// New bearer token.
    BearerToken(String),
}

impl TabEdit {
    /// Builds an edit from a field and raw text.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnsupportedMethod` when a method edit does not
    /// name GET, POST, PUT or DELETE.
    pub fn parse(field: TabField, value: &str) -> DomainResult<Self> {
        Ok(match field {
            TabField::Method => Self::Method(value.parse()?),
            TabField::Url => Self::Url(value.to_string()),
            TabField::Headers => Self::Headers(value.to_string()),
            TabField::Body => Self::Body(value.to_string()),
            TabField::BearerToken => Self::BearerToken(value.to_string()),
        })
    }

    /// Returns the field this edit replaces.
    #[must_use]
    pub const fn field(&self) -> TabField {
        match self {
            Self::Method(_) => TabField::Method,
            Self::Url(_) => TabField::Url,
            Self::Headers(_) => TabField::Headers,
            Self::Body(_) => TabField::Body,
            Self::BearerToken(_) => TabField::BearerToken,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_new_tab_defaults() {
        let tab = Tab::new(TabId::new(4));
        assert_eq!(tab.id(), TabId::new(4));
        assert_eq!(tab.request, RequestDraft::default());
        assert!(!tab.show_bearer_token_input);
        assert!(!tab.has_response());
        assert_eq!(tab.latest_send(), 0);
    }

    #[test]
    fn test_apply_touches_one_field() {
        let mut tab = Tab::new(TabId::FIRST);
        tab.apply(TabEdit::Url("https://example.com".to_string()));
        tab.apply(TabEdit::Method(HttpMethod::Put));

        let mut expected = Tab::new(TabId::FIRST);
        expected.request.url = "https://example.com".to_string();
        expected.request.method = HttpMethod::Put;
        assert_eq!(tab, expected);
    }

    #[test]
    fn test_parse_edit() {
        let field: TabField = "method".parse().unwrap();
        assert_eq!(
            TabEdit::parse(field, "post").unwrap(),
            TabEdit::Method(HttpMethod::Post)
        );
        assert!(TabEdit::parse(field, "TRACE").is_err());

        let token = TabEdit::parse("token".parse().unwrap(), " abc").unwrap();
        assert_eq!(token, TabEdit::BearerToken(" abc".to_string()));
        assert_eq!(token.field(), TabField::BearerToken);
    }

    #[test]
    fn test_unknown_field() {
        assert_eq!(
            "cookies".parse::<TabField>(),
            Err(DomainError::UnknownField("cookies".to_string()))
        );
    }

    #[test]
    fn test_tab_serialization() {
        let mut tab = Tab::new(TabId::new(2));
        tab.request.bearer_token = "abc".to_string();
        assert_eq!(
            serde_json::to_value(&tab).unwrap(),
            json!({
                "id": 2,
                "method": "GET",
                "url": "",
                "headers": "",
                "body": "",
                "bearerToken": "abc",
                "showBearerTokenInput": false,
                "response": null
            })
        );
    }
}
