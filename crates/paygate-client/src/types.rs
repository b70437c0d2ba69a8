//! Request and response types for the paygate client.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Customer attributes sent on create and update.
///
/// Absent fields are not serialized, so an update leaves them unchanged on the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerRequest {
    /// Merchant-chosen customer ID (create only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Fax number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Website URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Merchant-defined custom fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
    /// One-time nonce to vault as the customer's payment method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_nonce: Option<String>,
    /// Device data collected client-side for fraud checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_data: Option<String>,
}

impl CustomerRequest {
    /// Create an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the customer ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the company name.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Set the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the first and last name.
    #[must_use]
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    /// Set the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the fax number.
    #[must_use]
    pub fn with_fax(mut self, fax: impl Into<String>) -> Self {
        self.fax = Some(fax.into());
        self
    }

    /// Set the website.
    #[must_use]
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Set one custom field, keeping any already set.
    #[must_use]
    pub fn with_custom_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom_fields
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the payment method nonce.
    #[must_use]
    pub fn with_payment_method_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.payment_method_nonce = Some(nonce.into());
        self
    }

    /// Set the client-side device data.
    #[must_use]
    pub fn with_device_data(mut self, device_data: impl Into<String>) -> Self {
        self.device_data = Some(device_data.into());
        self
    }
}

/// Body of create and update requests.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CustomerEnvelope<'a> {
    /// Customer data.
    pub customer: &'a CustomerRequest,
}

/// Gateway error envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    /// Error details.
    pub api_error_response: ErrorResponse,
}

/// Structured error returned by the gateway for rejected requests.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorResponse {
    /// Summary message.
    #[serde(default)]
    pub message: String,
    /// Per-attribute validation errors.
    #[serde(default)]
    pub errors: Vec<ValidationError>,
    /// Parameters echoed back by the gateway, sensitive values removed.
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl ErrorResponse {
    /// Validation errors for one attribute.
    pub fn for_attribute<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.attribute == attribute)
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationError {
    /// Attribute the error applies to.
    pub attribute: String,
    /// Gateway error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}
