//! Core types and payload normalization for paygate.
//!
//! This crate provides the domain model shared by the paygate SDK crates:
//!
//! - **Payloads**: `Payload`, the decoded string-keyed body of a gateway response
//! - **Field mapping**: `MapFields`, `Slot` and the `construct` primitive
//! - **Payment methods**: `CreditCard`, `ApplePayCard`, `AndroidPayCard`, `PaypalAccount`,
//!   `UsBankAccount` and the borrowed `PaymentMethod` view
//! - **Customers**: `Customer`, `CustomerAttributes`
//! - **Shape dispatch**: `normalize`, `Shape`
//!
//! # Normalization
//!
//! Gateway responses arrive as loosely-typed JSON. Turning one into a [`Customer`] is a
//! two-stage process:
//!
//! 1. Generic field mapping copies every known key onto a fixed attribute table
//!    ([`CustomerAttributes`]), leaving defaults for absent keys and ignoring unknown ones.
//! 2. The customer post-processing step replaces each raw payment-method list with the
//!    output of its sub-entity normalizer.
//!
//! ```
//! use paygate_core::{Customer, Shape};
//! use serde_json::json;
//!
//! let raw = json!({"customer": {"first_name": "Jen", "credit_cards": [{"last_4": "1111"}]}});
//! let Shape::One(customer) = Customer::normalize(&raw).unwrap() else { unreachable!() };
//!
//! assert_eq!(customer.first_name.as_deref(), Some("Jen"));
//! assert_eq!(customer.credit_cards[0].last_4.as_deref(), Some("1111"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod customer;
pub mod error;
pub mod fields;
pub mod normalize;
pub mod payload;
pub mod payment_method;

pub use customer::{Customer, CustomerAttributes, CUSTOMER_ENVELOPE_KEY};
pub use error::{NormalizeError, Result};
pub use fields::{construct, MapFields, Slot};
pub use normalize::{normalize, Shape};
pub use payload::{Payload, ValueKind};
pub use payment_method::{
    AndroidPayCard, ApplePayCard, CreditCard, PaymentMethod, PaypalAccount, SubEntity,
    UsBankAccount,
};
