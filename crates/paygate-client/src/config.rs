//! Gateway configuration.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ClientError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Gateway environment a client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Local gateway for development.
    Development,
    /// Sandbox, no real money moves.
    #[default]
    Sandbox,
    /// Live gateway.
    Production,
}

impl Environment {
    /// Base URL of the environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Development => "http://localhost:3000",
            Self::Sandbox => "https://api.sandbox.paygate.com",
            Self::Production => "https://api.paygate.com",
        }
    }
}

impl FromStr for Environment {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            other => Err(ClientError::Configuration(format!(
                "unknown environment: {other}"
            ))),
        }
    }
}

/// Gateway credentials and connection settings.
#[derive(Clone, Deserialize)]
pub struct GatewayConfig {
    /// Environment (default: sandbox).
    #[serde(default)]
    pub environment: Environment,

    /// Overrides the environment's base URL (e.g. for a mock server).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Merchant account ID.
    pub merchant_id: String,

    /// Public API key.
    pub public_key: String,

    /// Private API key.
    pub private_key: String,

    /// Request timeout in seconds (default: 60).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

const fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("merchant_id", &self.merchant_id)
            .field("public_key", &self.public_key)
            .field("private_key", &"[redacted]")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl GatewayConfig {
    /// Create a configuration for an environment.
    #[must_use]
    pub fn new(
        environment: Environment,
        merchant_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            base_url: None,
            merchant_id: merchant_id.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Point the client at a custom base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `PAYGATE_ENVIRONMENT`, `PAYGATE_BASE_URL`, `PAYGATE_MERCHANT_ID`,
    /// `PAYGATE_PUBLIC_KEY`, `PAYGATE_PRIVATE_KEY` and `PAYGATE_TIMEOUT_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment name is unknown or a credential is missing.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let environment = lookup("PAYGATE_ENVIRONMENT")
            .map(|s| s.parse::<Environment>())
            .transpose()?
            .unwrap_or_default();

        let config = Self {
            environment,
            base_url: lookup("PAYGATE_BASE_URL"),
            merchant_id: lookup("PAYGATE_MERCHANT_ID").unwrap_or_default(),
            public_key: lookup("PAYGATE_PUBLIC_KEY").unwrap_or_default(),
            private_key: lookup("PAYGATE_PRIVATE_KEY").unwrap_or_default(),
            timeout_seconds: lookup("PAYGATE_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON secrets file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a credential is missing.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&contents)?;

        tracing::info!(
            path = %path.display(),
            merchant_id = %config.merchant_id,
            "Loaded gateway config from file"
        );

        config.validate()?;
        Ok(config)
    }

    /// Check that all credentials are present.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] naming the first missing setting.
    pub fn validate(&self) -> Result<(), ClientError> {
        let required = [
            ("merchant_id", &self.merchant_id),
            ("public_key", &self.public_key),
            ("private_key", &self.private_key),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ClientError::Configuration(format!("{name} is required")));
            }
        }

        if self.timeout_seconds == 0 {
            return Err(ClientError::Configuration(
                "timeout_seconds must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Base URL in effect, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(self.environment.base_url())
            .trim_end_matches('/')
    }

    /// Root URL for this merchant's resources.
    #[must_use]
    pub fn merchant_url(&self) -> String {
        format!("{}/merchants/{}", self.base_url(), self.merchant_id)
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
