//! HTTP client settings

use std::time::Duration;

/// Default redirect limit.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Transport knobs for [`ReqwestHttpClient`](super::ReqwestHttpClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// How many redirects are followed before giving up.
    pub max_redirects: usize,
    /// Whole-request timeout. `None` keeps reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout: None,
        }
    }
}

/// Returns `Courier/<crate version>`.
#[must_use]
pub fn default_user_agent() -> String {
    format!("Courier/{}", env!("CARGO_PKG_VERSION"))
}
