//! Common test utilities for paygate client integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use paygate_client::{Environment, GatewayConfig, PaygateClient};
use wiremock::MockServer;

/// Merchant ID used by every harness.
pub const MERCHANT_ID: &str = "merchant_1";

/// Public key used by every harness.
pub const PUBLIC_KEY: &str = "test-public-key";

/// Private key used by every harness.
pub const PRIVATE_KEY: &str = "test-private-key";

/// Test harness with a mock gateway and a client pointed at it.
pub struct TestHarness {
    /// The mock gateway.
    pub server: MockServer,
    /// Client configured against the mock gateway.
    pub client: PaygateClient,
}

impl TestHarness {
    /// Start a fresh mock gateway.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = GatewayConfig::new(Environment::Development, MERCHANT_ID, PUBLIC_KEY, PRIVATE_KEY)
            .with_base_url(server.uri())
            .with_timeout_seconds(5);
        let client = PaygateClient::new(&config).expect("Failed to create client");

        Self { server, client }
    }

    /// Full mock-server path for a merchant-relative path.
    pub fn path(suffix: &str) -> String {
        format!("/merchants/{MERCHANT_ID}{suffix}")
    }
}
