//! Connector configuration.
//!
//! A [`ConnectorConfig`] is read from JSON. Credentials can reference environment
//! variables so the file itself holds no secrets:
//!
//! ```json
//! {
//!   "environment": "sandbox",
//!   "username": "$BLUESNAP_USERNAME",
//!   "password": "${BLUESNAP_PASSWORD}",
//!   "timeoutSecs": 30
//! }
//! ```
//!
//! `baseUrl` overrides the URL implied by `environment`, e.g. to go through a proxy.

use bluesnap_types::config::LiteralOrEnv;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::connector::{Connector, ConnectorError};
use crate::options::{Credentials, Options};

/// The gateway environments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://sandbox.bluesnap.com",
            Environment::Production => "https://ws.bluesnap.com",
        }
    }

    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.base_url_str())
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Sandbox => f.write_str("sandbox"),
            Environment::Production => f.write_str("production"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            other => Err(format!("Unknown environment '{other}'")),
        }
    }
}

/// Connector settings and credentials.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorConfig {
    #[serde(default = "config_defaults::default_environment")]
    environment: Environment,
    #[serde(default)]
    base_url: Option<LiteralOrEnv<Url>>,
    username: LiteralOrEnv<String>,
    password: LiteralOrEnv<String>,
    #[serde(default = "config_defaults::default_timeout_secs")]
    timeout_secs: u64,
}

pub mod config_defaults {
    use std::env;

    use super::Environment;

    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Returns the default environment with fallback: $BLUESNAP_ENVIRONMENT env var -> sandbox
    pub fn default_environment() -> Environment {
        env::var("BLUESNAP_ENVIRONMENT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Returns the default timeout with fallback: $BLUESNAP_TIMEOUT_SECS env var -> 60
    pub fn default_timeout_secs() -> u64 {
        env::var("BLUESNAP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {0}: {1}")]
    FileRead(PathBuf, std::io::Error),
    #[error("Failed to parse config file: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("Invalid base URL: {0}")]
    BaseUrl(#[source] url::ParseError),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

impl ConnectorConfig {
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// The explicit `baseUrl` if set, else the environment's URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        match &self.base_url {
            Some(url) => Ok(url.inner().clone()),
            None => self.environment.base_url().map_err(ConfigError::BaseUrl),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.inner(), self.password.inner())
    }

    pub fn options(&self) -> Options {
        Options::new(self.credentials())
    }

    /// Parses configuration from a JSON string, resolving environment references.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(path.to_path_buf(), e))?;
        Self::from_json_str(&content)
    }
}

impl Debug for ConnectorConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("username", self.username.inner())
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Connector {
    /// Builds a connector and the matching call options from configuration.
    ///
    /// The underlying `reqwest::Client` gets the configured timeout.
    pub fn from_config(config: &ConnectorConfig) -> Result<(Connector, Options), ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ConfigError::HttpClient)?;
        let connector = Connector::new(client, config.base_url()?)?;
        #[cfg(feature = "telemetry")]
        tracing::debug!(
            environment = %config.environment,
            base_url = %connector.base_url(),
            "Connector configured"
        );
        Ok((connector, config.options()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_environment_urls() {
        assert_eq!(
            Environment::Sandbox.base_url().unwrap().as_str(),
            "https://sandbox.bluesnap.com/"
        );
        assert_eq!(
            Environment::Production.base_url().unwrap().host_str(),
            Some("ws.bluesnap.com")
        );
        assert_eq!("Production".parse::<Environment>(), Ok(Environment::Production));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_credentials_from_env_references() {
        unsafe {
            std::env::set_var("BLUESNAP_CFG_TEST_USER", "API_1444650203144940422365");
            std::env::set_var("BLUESNAP_CFG_TEST_PASS", "BLUE123");
        }
        let config = ConnectorConfig::from_json_str(
            r#"{
                "environment": "production",
                "username": "$BLUESNAP_CFG_TEST_USER",
                "password": "${BLUESNAP_CFG_TEST_PASS}",
                "timeoutSecs": 5
            }"#,
        )
        .unwrap();
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.credentials().username(), "API_1444650203144940422365");
        assert_eq!(
            config.credentials(),
            Credentials::new("API_1444650203144940422365", "BLUE123")
        );
        assert_eq!(config.base_url().unwrap().host_str(), Some("ws.bluesnap.com"));
    }

    #[test]
    fn test_missing_env_reference_fails() {
        let err = ConnectorConfig::from_json_str(
            r#"{"username": "$BLUESNAP_CFG_TEST_UNSET_VAR", "password": "x"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::JsonParse(_)));
        assert!(err.to_string().contains("BLUESNAP_CFG_TEST_UNSET_VAR"));
    }

    #[test]
    fn test_base_url_overrides_environment() {
        let config = ConnectorConfig::from_json_str(
            r#"{
                "environment": "production",
                "baseUrl": "http://localhost:9000/bluesnap/",
                "username": "u",
                "password": "p"
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "http://localhost:9000/bluesnap/"
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let config =
            ConnectorConfig::from_json_str(r#"{"username": "API_user", "password": "hunter2"}"#)
                .unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("API_user"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"environment": "sandbox", "username": "u", "password": "p", "timeoutSecs": 12}}"#
        )
        .unwrap();
        let config = ConnectorConfig::load(file.path()).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(12));

        let err = ConnectorConfig::load("/nonexistent/bluesnap.json").unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(..)));
    }

    #[test]
    fn test_connector_from_config() {
        let config = ConnectorConfig::from_json_str(
            r#"{"environment": "sandbox", "username": "u", "password": "p"}"#,
        )
        .unwrap();
        let (connector, options) = Connector::from_config(&config).unwrap();
        assert_eq!(connector.base_url().as_str(), "https://sandbox.bluesnap.com/");
        assert_eq!(options.credentials.username(), "u");
    }

    #[test]
    fn test_connector_from_config_rejects_non_http_base_url() {
        let config = ConnectorConfig::from_json_str(
            r#"{"baseUrl": "ftp://files.example.com", "username": "u", "password": "p"}"#,
        )
        .unwrap();
        let err = Connector::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Connector(_)));
    }
}
