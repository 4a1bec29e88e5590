//! Application configuration.
//!
//! Built-in defaults overlaid by `COURIER_*` environment variables, e.g.
//! `COURIER_TIMEOUT_MS=5000` or `COURIER_LOG_FILTER=courier_ui=debug`.

use std::time::Duration;

use ::config::{Config, ConfigError, Environment};
use courier_infrastructure::ClientSettings;
use serde::Deserialize;

/// Prefix of the environment variables read by [`AppConfig::load`].
pub const ENV_PREFIX: &str = "COURIER";

/// Settings for one run of the binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Redirects followed before a send fails.
    pub max_redirects: usize,
    /// Whole-request timeout in milliseconds. Unset means no timeout.
    pub timeout_ms: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            log_filter: "info".to_string(),
            user_agent: client.user_agent,
            max_redirects: client.max_redirects,
            timeout_ms: None,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable cannot be converted to its key's type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Returns the HTTP client settings.
    #[must_use]
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            user_agent: self.user_agent.clone(),
            max_redirects: self.max_redirects,
            timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }
}
