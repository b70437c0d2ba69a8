//! Paygate Client SDK.
//!
//! This crate provides a client library for managing customers on the paygate payment
//! gateway. Responses are normalized into [`paygate_core::Customer`] values with typed
//! payment methods.
//!
//! # Example
//!
//! ```no_run
//! use paygate_client::{CustomerRequest, Environment, GatewayConfig, PaygateClient, RequestOptions};
//!
//! # async fn example() -> Result<(), paygate_client::ClientError> {
//! let config = GatewayConfig::new(Environment::Sandbox, "merchant-id", "public-key", "private-key");
//! let client = PaygateClient::new(&config)?;
//!
//! let customer = client
//!     .customers()
//!     .create(
//!         &CustomerRequest::new().with_company("Soren").with_email("parker@example.com"),
//!         &RequestOptions::new(),
//!     )
//!     .await?;
//!
//! println!("Created customer {:?} with {} cards", customer.id, customer.credit_cards.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod config;
mod customers;
mod error;
pub mod search;
mod transport;
mod types;

pub use client::PaygateClient;
pub use config::{Environment, GatewayConfig, DEFAULT_TIMEOUT_SECONDS};
pub use customers::{CustomerGateway, CUSTOMERS_PATH};
pub use error::ClientError;
pub use search::{CustomerSearch, TextField, TextOp};
pub use transport::{HttpTransport, Method, RequestOptions, Transport, API_VERSION};
pub use types::{CustomerRequest, ErrorResponse, ValidationError};

pub use paygate_core::{
    AndroidPayCard, ApplePayCard, CreditCard, Customer, NormalizeError, PaymentMethod,
    PaypalAccount, Shape, SubEntity, UsBankAccount,
};
