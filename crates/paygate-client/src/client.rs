//! Paygate HTTP client.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::customers::CustomerGateway;
use crate::error::ClientError;
use crate::transport::{HttpTransport, Transport};

/// Paygate API client.
///
/// Cheap to clone; every clone shares one transport.
#[derive(Debug, Clone)]
pub struct PaygateClient {
    transport: Arc<dyn Transport>,
}

impl PaygateClient {
    /// Create a client over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or the HTTP client cannot
    /// be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let transport = HttpTransport::new(config)?;

        tracing::debug!(
            merchant_url = %transport.merchant_url(),
            environment = ?config.environment,
            "Created paygate client"
        );

        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client configured from `PAYGATE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Same as [`GatewayConfig::from_env`] and [`new`](Self::new).
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(&GatewayConfig::from_env()?)
    }

    /// Create a client over any transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Customer operations.
    #[must_use]
    pub fn customers(&self) -> CustomerGateway {
        CustomerGateway::new(Arc::clone(&self.transport))
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }
}
