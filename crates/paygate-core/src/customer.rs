//! The customer aggregate and its normalizer.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::fields::{construct, mapped_record};
use crate::normalize::{normalize, Shape};
use crate::payload::Payload;
use crate::payment_method::{
    AndroidPayCard, ApplePayCard, CreditCard, PaymentMethod, PaypalAccount, SubEntity,
    UsBankAccount,
};

/// Key under which some responses nest the customer payload.
pub const CUSTOMER_ENVELOPE_KEY: &str = "customer";

mapped_record! {
    /// Customer attributes as mapped from the wire, before payment methods are typed.
    ///
    /// This is the output of generic field mapping. The five payment-method lists are
    /// still raw payloads; converting into [`Customer`] normalizes them.
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct CustomerAttributes {
        /// Gateway customer ID.
        pub id: Option<String>,
        /// Company name.
        pub company: Option<String>,
        /// Email address.
        pub email: Option<String>,
        /// Fax number.
        pub fax: Option<String>,
        /// First name.
        pub first_name: Option<String>,
        /// Last name.
        pub last_name: Option<String>,
        /// Phone number.
        pub phone: Option<String>,
        /// Website URL.
        pub website: Option<String>,
        /// Creation timestamp, opaque.
        pub created_at: Option<String>,
        /// Last update timestamp, opaque.
        pub updated_at: Option<String>,
        /// Merchant-defined custom fields.
        pub custom_fields: Map<String, Value>,
        /// Addresses, untyped.
        pub addresses: Vec<Payload>,
        /// Coinbase accounts, untyped.
        pub coinbase_accounts: Vec<Payload>,
        /// Raw Android Pay cards.
        pub android_pay_cards: Vec<Payload>,
        /// Raw Apple Pay cards.
        pub apple_pay_cards: Vec<Payload>,
        /// Raw credit cards.
        pub credit_cards: Vec<Payload>,
        /// Raw PayPal accounts.
        pub paypal_accounts: Vec<Payload>,
        /// Raw US bank accounts.
        pub us_bank_accounts: Vec<Payload>,
    }
}

/// A gateway customer with typed payment methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Customer {
    /// Gateway customer ID.
    pub id: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Fax number.
    pub fax: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// Creation timestamp, opaque.
    pub created_at: Option<String>,
    /// Last update timestamp, opaque.
    pub updated_at: Option<String>,
    /// Merchant-defined custom fields.
    pub custom_fields: Map<String, Value>,
    /// Addresses, untyped.
    pub addresses: Vec<Payload>,
    /// Coinbase accounts, untyped.
    pub coinbase_accounts: Vec<Payload>,
    /// Android Pay cards.
    pub android_pay_cards: Vec<AndroidPayCard>,
    /// Apple Pay cards.
    pub apple_pay_cards: Vec<ApplePayCard>,
    /// Credit cards.
    pub credit_cards: Vec<CreditCard>,
    /// PayPal accounts.
    pub paypal_accounts: Vec<PaypalAccount>,
    /// US bank accounts.
    pub us_bank_accounts: Vec<UsBankAccount>,
}

impl From<CustomerAttributes> for Customer {
    fn from(attrs: CustomerAttributes) -> Self {
        Self {
            android_pay_cards: AndroidPayCard::from_payloads(&attrs.android_pay_cards),
            apple_pay_cards: ApplePayCard::from_payloads(&attrs.apple_pay_cards),
            credit_cards: CreditCard::from_payloads(&attrs.credit_cards),
            paypal_accounts: PaypalAccount::from_payloads(&attrs.paypal_accounts),
            us_bank_accounts: UsBankAccount::from_payloads(&attrs.us_bank_accounts),
            id: attrs.id,
            company: attrs.company,
            email: attrs.email,
            fax: attrs.fax,
            first_name: attrs.first_name,
            last_name: attrs.last_name,
            phone: attrs.phone,
            website: attrs.website,
            created_at: attrs.created_at,
            updated_at: attrs.updated_at,
            custom_fields: attrs.custom_fields,
            addresses: attrs.addresses,
            coinbase_accounts: attrs.coinbase_accounts,
        }
    }
}

impl Customer {
    /// Build a customer from a single unwrapped payload.
    #[must_use]
    pub fn from_payload(payload: &Payload) -> Self {
        construct::<CustomerAttributes>(payload).into()
    }

    /// Normalize a decoded response holding one customer or a list of them.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::UnsupportedShape`](crate::NormalizeError::UnsupportedShape)
    /// when the input is not an object or an array of objects.
    pub fn normalize(input: &Value) -> Result<Shape<Self>> {
        normalize(input, CUSTOMER_ENVELOPE_KEY, Self::from_payload)
    }

    /// Every payment method across the five collections.
    ///
    /// Ordered credit cards, PayPal accounts, Apple Pay cards, Android Pay cards, then
    /// US bank accounts.
    #[must_use]
    pub fn payment_methods(&self) -> Vec<PaymentMethod<'_>> {
        self.credit_cards
            .iter()
            .map(PaymentMethod::CreditCard)
            .chain(self.paypal_accounts.iter().map(PaymentMethod::PaypalAccount))
            .chain(self.apple_pay_cards.iter().map(PaymentMethod::ApplePayCard))
            .chain(self.android_pay_cards.iter().map(PaymentMethod::AndroidPayCard))
            .chain(self.us_bank_accounts.iter().map(PaymentMethod::UsBankAccount))
            .collect()
    }

    /// The payment method flagged as default, if any.
    #[must_use]
    pub fn default_payment_method(&self) -> Option<PaymentMethod<'_>> {
        self.payment_methods().into_iter().find(PaymentMethod::is_default)
    }

    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::MapFields;
    use crate::NormalizeError;
    use serde_json::json;

    fn one(input: &Value) -> Customer {
        Customer::normalize(input)
            .expect("normalization should succeed")
            .into_one()
            .expect("input should be singular")
    }

    #[test]
    fn scalar_fields_and_defaults() {
        let customer = one(&json!({"company": "Soren", "email": "parker@example.com"}));

        assert_eq!(customer.company.as_deref(), Some("Soren"));
        assert_eq!(customer.email.as_deref(), Some("parker@example.com"));
        assert!(customer.id.is_none());
        assert!(customer.first_name.is_none());
        assert!(customer.last_name.is_none());
        assert!(customer.fax.is_none());
        assert!(customer.phone.is_none());
        assert!(customer.website.is_none());
        assert!(customer.created_at.is_none());
        assert!(customer.updated_at.is_none());
        assert!(customer.custom_fields.is_empty());
        assert!(customer.addresses.is_empty());
        assert!(customer.coinbase_accounts.is_empty());
        assert!(customer.payment_methods().is_empty());
    }

    #[test]
    fn missing_payment_method_keys_yield_empty_typed_lists() {
        let customer = one(&json!({"id": "cus_1"}));

        assert_eq!(customer.android_pay_cards, Vec::<AndroidPayCard>::new());
        assert_eq!(customer.apple_pay_cards, Vec::<ApplePayCard>::new());
        assert_eq!(customer.credit_cards, Vec::<CreditCard>::new());
        assert_eq!(customer.paypal_accounts, Vec::<PaypalAccount>::new());
        assert_eq!(customer.us_bank_accounts, Vec::<UsBankAccount>::new());
    }

    #[test]
    fn enveloped_credit_cards_are_normalized() {
        let customer = one(&json!({
            "customer": {"first_name": "Jen", "credit_cards": [{"masked_number": "1111"}]}
        }));

        assert_eq!(customer.first_name.as_deref(), Some("Jen"));
        let raw = json!({"masked_number": "1111"}).as_object().cloned().unwrap();
        assert_eq!(customer.credit_cards, CreditCard::from_payloads(&[raw]));
        assert_eq!(customer.credit_cards[0].masked_number.as_deref(), Some("1111"));
    }

    #[test]
    fn envelope_gives_same_result_as_bare_payload() {
        let payload = json!({
            "id": "cus_9",
            "custom_fields": {"loyalty": "gold"},
            "paypal_accounts": [{"token": "pp", "email": "jen@example.com"}],
            "us_bank_accounts": [{"token": "ach", "last_4": "0000"}],
        });
        let wrapped = json!({"customer": payload.clone()});

        assert_eq!(one(&wrapped), one(&payload));
    }

    #[test]
    fn unknown_keys_do_not_change_output() {
        let base = json!({"id": "cus_1", "email": "a@example.com"});
        let extra = json!({
            "id": "cus_1",
            "email": "a@example.com",
            "risk_score": 42,
            "merchant": {},
        });

        assert_eq!(one(&base), one(&extra));
    }

    #[test]
    fn list_preserves_order_and_length() {
        let shape = Customer::normalize(&json!([
            {"id": "a", "company": "Alpha"},
            {"customer": {"id": "b", "company": "Beta"}},
            {"id": "c"},
        ]))
        .unwrap();

        let customers = shape.into_vec();
        assert_eq!(customers.len(), 3);
        let ids: Vec<_> = customers.iter().map(|c| c.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("a"), Some("b"), Some("c")]);
        assert_eq!(customers[1].company.as_deref(), Some("Beta"));
        assert!(customers[2].company.is_none());
    }

    #[test]
    fn empty_list_yields_empty_list() {
        assert_eq!(Customer::normalize(&json!([])).unwrap(), Shape::Many(vec![]));
    }

    #[test]
    fn timestamps_stay_opaque() {
        let customer = one(&json!({"created_at": "2026-01-02T03:04:05Z", "phone": 5551234}));
        assert_eq!(customer.created_at.as_deref(), Some("2026-01-02T03:04:05Z"));
        assert_eq!(customer.phone.as_deref(), Some("5551234"));
    }

    #[test]
    fn dashed_wire_keys_are_mapped() {
        let customer = one(&json!({"first-name": "Jen", "credit-cards": [{"last-4": "1881"}]}));
        assert_eq!(customer.first_name.as_deref(), Some("Jen"));
        assert_eq!(customer.credit_cards[0].last_4.as_deref(), Some("1881"));
    }

    #[test]
    fn null_input_is_unsupported() {
        assert!(matches!(
            Customer::normalize(&Value::Null),
            Err(NormalizeError::UnsupportedShape { found: "null", position: None })
        ));
    }

    #[test]
    fn customer_key_holding_scalar_is_an_unknown_attribute() {
        let customer = one(&json!({"customer": "cus_1"}));
        assert_eq!(customer, one(&json!({})));
    }

    #[test]
    fn default_payment_method_spans_collections() {
        let customer = one(&json!({
            "credit_cards": [{"token": "cc", "default": false}],
            "us_bank_accounts": [{"token": "ach", "default": true}],
        }));

        let methods = customer.payment_methods();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].kind(), "credit_card");

        let default = customer.default_payment_method().expect("a default method");
        assert_eq!(default.token(), Some("ach"));
        assert_eq!(default.kind(), "us_bank_account");
    }

    #[test]
    fn full_name_joins_present_parts() {
        let both = one(&json!({"first_name": "Jen", "last_name": "Parker"}));
        assert_eq!(both.full_name().as_deref(), Some("Jen Parker"));

        let last_only = one(&json!({"last_name": "Parker"}));
        assert_eq!(last_only.full_name().as_deref(), Some("Parker"));

        assert_eq!(one(&json!({})).full_name(), None);
    }

    #[test]
    fn attribute_table_covers_every_customer_field() {
        assert_eq!(CustomerAttributes::FIELDS.len(), 18);
        assert!(CustomerAttributes::FIELDS.contains(&"us_bank_accounts"));
    }
}
