//! Payment-method sub-entities attached to a customer.
//!
//! The set of payment-method types is closed: credit cards, Apple Pay cards, Android Pay
//! cards, PayPal accounts and US bank accounts. Each is a mapped record with its own
//! sub-entity normalizer, [`SubEntity::from_payloads`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::fields::{construct, mapped_record, MapFields};
use crate::payload::Payload;

/// A record normalized from a list of raw payment-method payloads.
pub trait SubEntity: MapFields {
    /// Wire name of the payment-method kind.
    const KIND: &'static str;

    /// Normalize a raw list, preserving order. An empty list yields an empty list.
    #[must_use]
    fn from_payloads(raw: &[Payload]) -> Vec<Self> {
        raw.iter().map(construct::<Self>).collect()
    }
}

mapped_record! {
    /// A stored credit card.
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct CreditCard {
        /// Payment-method token.
        pub token: Option<String>,
        /// Bank identification number (first six digits).
        pub bin: Option<String>,
        /// Last four digits.
        pub last_4: Option<String>,
        /// Card brand, e.g. `"Visa"`.
        pub card_type: Option<String>,
        /// Masked card number, e.g. `"411111******1111"`.
        pub masked_number: Option<String>,
        /// Two-digit expiration month.
        pub expiration_month: Option<String>,
        /// Four-digit expiration year.
        pub expiration_year: Option<String>,
        /// Name printed on the card.
        pub cardholder_name: Option<String>,
        /// Owning customer ID.
        pub customer_id: Option<String>,
        /// Fingerprint shared by every vaulted copy of the same card number.
        pub unique_number_identifier: Option<String>,
        /// Card brand logo.
        pub image_url: Option<String>,
        /// Whether this is the customer's default payment method.
        pub default: bool,
        /// Whether the card is past its expiration date.
        pub expired: bool,
        /// Creation timestamp.
        pub created_at: Option<String>,
        /// Last update timestamp.
        pub updated_at: Option<String>,
        /// Billing address, untyped.
        pub billing_address: Map<String, Value>,
    }
}

impl CreditCard {
    /// Expiration as `MM/YYYY`, when both parts are present.
    #[must_use]
    pub fn expiration_date(&self) -> Option<String> {
        match (&self.expiration_month, &self.expiration_year) {
            (Some(month), Some(year)) => Some(format!("{month}/{year}")),
            _ => None,
        }
    }
}

impl SubEntity for CreditCard {
    const KIND: &'static str = "credit_card";
}

mapped_record! {
    /// A card provisioned through Apple Pay.
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct ApplePayCard {
        /// Payment-method token.
        pub token: Option<String>,
        /// Bank identification number.
        pub bin: Option<String>,
        /// Last four digits of the device account number.
        pub last_4: Option<String>,
        /// Card brand, e.g. `"Apple Pay - Visa"`.
        pub card_type: Option<String>,
        /// Two-digit expiration month.
        pub expiration_month: Option<String>,
        /// Four-digit expiration year.
        pub expiration_year: Option<String>,
        /// Cardholder name.
        pub cardholder_name: Option<String>,
        /// Display name of the instrument, e.g. `"Visa 8886"`.
        pub payment_instrument_name: Option<String>,
        /// Description of the underlying card.
        pub source_description: Option<String>,
        /// Owning customer ID.
        pub customer_id: Option<String>,
        /// Card brand logo.
        pub image_url: Option<String>,
        /// Whether this is the customer's default payment method.
        pub default: bool,
        /// Whether the card is past its expiration date.
        pub expired: bool,
        /// Creation timestamp.
        pub created_at: Option<String>,
        /// Last update timestamp.
        pub updated_at: Option<String>,
    }
}

impl SubEntity for ApplePayCard {
    const KIND: &'static str = "apple_pay_card";
}

mapped_record! {
    /// A card provisioned through Android Pay.
    ///
    /// Carries both the virtual (tokenized) card and the source card it stands for.
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct AndroidPayCard {
        /// Payment-method token.
        pub token: Option<String>,
        /// Bank identification number.
        pub bin: Option<String>,
        /// Google transaction identifier.
        pub google_transaction_id: Option<String>,
        /// Brand of the virtual card.
        pub virtual_card_type: Option<String>,
        /// Last four digits of the virtual card.
        pub virtual_card_last_4: Option<String>,
        /// Brand of the source card.
        pub source_card_type: Option<String>,
        /// Last four digits of the source card.
        pub source_card_last_4: Option<String>,
        /// Description of the source card.
        pub source_description: Option<String>,
        /// Two-digit expiration month.
        pub expiration_month: Option<String>,
        /// Four-digit expiration year.
        pub expiration_year: Option<String>,
        /// Owning customer ID.
        pub customer_id: Option<String>,
        /// Card brand logo.
        pub image_url: Option<String>,
        /// Whether this is the customer's default payment method.
        pub default: bool,
        /// Creation timestamp.
        pub created_at: Option<String>,
        /// Last update timestamp.
        pub updated_at: Option<String>,
    }
}

impl AndroidPayCard {
    /// Card brand as charged, i.e. the virtual card's brand.
    #[must_use]
    pub fn card_type(&self) -> Option<&str> {
        self.virtual_card_type.as_deref()
    }

    /// Last four digits as charged, i.e. the virtual card's.
    #[must_use]
    pub fn last_4(&self) -> Option<&str> {
        self.virtual_card_last_4.as_deref()
    }
}

impl SubEntity for AndroidPayCard {
    const KIND: &'static str = "android_pay_card";
}

mapped_record! {
    /// A vaulted PayPal account.
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct PaypalAccount {
        /// Payment-method token.
        pub token: Option<String>,
        /// PayPal account email.
        pub email: Option<String>,
        /// Billing agreement for future payments.
        pub billing_agreement_id: Option<String>,
        /// PayPal payer identifier.
        pub payer_id: Option<String>,
        /// Owning customer ID.
        pub customer_id: Option<String>,
        /// PayPal logo.
        pub image_url: Option<String>,
        /// Whether this is the customer's default payment method.
        pub default: bool,
        /// Creation timestamp.
        pub created_at: Option<String>,
        /// Last update timestamp.
        pub updated_at: Option<String>,
    }
}

impl SubEntity for PaypalAccount {
    const KIND: &'static str = "paypal_account";
}

mapped_record! {
    /// A US bank account for ACH payments.
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct UsBankAccount {
        /// Payment-method token.
        pub token: Option<String>,
        /// ABA routing number.
        pub routing_number: Option<String>,
        /// Last four digits of the account number.
        pub last_4: Option<String>,
        /// `checking` or `savings`.
        pub account_type: Option<String>,
        /// Name on the account.
        pub account_holder_name: Option<String>,
        /// Bank name resolved from the routing number.
        pub bank_name: Option<String>,
        /// `personal` or `business`.
        pub ownership_type: Option<String>,
        /// Owning customer ID.
        pub customer_id: Option<String>,
        /// Bank logo.
        pub image_url: Option<String>,
        /// Whether this is the customer's default payment method.
        pub default: bool,
        /// Whether the account passed verification.
        pub verified: bool,
        /// Creation timestamp.
        pub created_at: Option<String>,
        /// Last update timestamp.
        pub updated_at: Option<String>,
    }
}

impl SubEntity for UsBankAccount {
    const KIND: &'static str = "us_bank_account";
}

/// A borrowed view of any payment method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentMethod<'a> {
    /// A credit card.
    CreditCard(&'a CreditCard),
    /// A PayPal account.
    PaypalAccount(&'a PaypalAccount),
    /// An Apple Pay card.
    ApplePayCard(&'a ApplePayCard),
    /// An Android Pay card.
    AndroidPayCard(&'a AndroidPayCard),
    /// A US bank account.
    UsBankAccount(&'a UsBankAccount),
}

impl<'a> PaymentMethod<'a> {
    /// Payment-method token.
    #[must_use]
    pub fn token(&self) -> Option<&'a str> {
        match *self {
            Self::CreditCard(m) => m.token.as_deref(),
            Self::PaypalAccount(m) => m.token.as_deref(),
            Self::ApplePayCard(m) => m.token.as_deref(),
            Self::AndroidPayCard(m) => m.token.as_deref(),
            Self::UsBankAccount(m) => m.token.as_deref(),
        }
    }

    /// Whether this is the customer's default payment method.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        match self {
            Self::CreditCard(m) => m.default,
            Self::PaypalAccount(m) => m.default,
            Self::ApplePayCard(m) => m.default,
            Self::AndroidPayCard(m) => m.default,
            Self::UsBankAccount(m) => m.default,
        }
    }

    /// Wire name of the payment-method kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CreditCard(_) => CreditCard::KIND,
            Self::PaypalAccount(_) => PaypalAccount::KIND,
            Self::ApplePayCard(_) => ApplePayCard::KIND,
            Self::AndroidPayCard(_) => AndroidPayCard::KIND,
            Self::UsBankAccount(_) => UsBankAccount::KIND,
        }
    }
}
