//! Search criteria and the search execution pipeline.

use chrono::{DateTime, SecondsFormat, Utc};
use paygate_core::Shape;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::ClientError;
use crate::transport::{RequestOptions, Transport};

/// A text predicate on one searchable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOp {
    /// Exact match.
    Is(String),
    /// Anything but an exact match.
    IsNot(String),
    /// Prefix match.
    StartsWith(String),
    /// Suffix match.
    EndsWith(String),
    /// Substring match.
    Contains(String),
}

impl TextOp {
    /// Exact match.
    pub fn is(value: impl Into<String>) -> Self {
        Self::Is(value.into())
    }

    /// Anything but an exact match.
    pub fn is_not(value: impl Into<String>) -> Self {
        Self::IsNot(value.into())
    }

    /// Prefix match.
    pub fn starts_with(value: impl Into<String>) -> Self {
        Self::StartsWith(value.into())
    }

    /// Suffix match.
    pub fn ends_with(value: impl Into<String>) -> Self {
        Self::EndsWith(value.into())
    }

    /// Substring match.
    pub fn contains(value: impl Into<String>) -> Self {
        Self::Contains(value.into())
    }

    fn into_parts(self) -> (&'static str, String) {
        match self {
            Self::Is(v) => ("is", v),
            Self::IsNot(v) => ("is_not", v),
            Self::StartsWith(v) => ("starts_with", v),
            Self::EndsWith(v) => ("ends_with", v),
            Self::Contains(v) => ("contains", v),
        }
    }
}

/// Customer fields that accept text predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    /// Customer ID.
    Id,
    /// Company name.
    Company,
    /// Email address.
    Email,
    /// First name.
    FirstName,
    /// Last name.
    LastName,
    /// Phone number.
    Phone,
    /// Website URL.
    Website,
    /// Fax number.
    Fax,
    /// Token of any of the customer's payment methods.
    PaymentMethodToken,
}

impl TextField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Company => "company",
            Self::Email => "email",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Phone => "phone",
            Self::Website => "website",
            Self::Fax => "fax",
            Self::PaymentMethodToken => "payment_method_token",
        }
    }
}

/// Criteria for a customer search.
///
/// ```
/// use paygate_client::{CustomerSearch, TextField, TextOp};
///
/// let search = CustomerSearch::new()
///     .text(TextField::Email, TextOp::ends_with("@example.com"))
///     .ids(["cus_1", "cus_2"]);
///
/// assert_eq!(search.to_body()["search"]["ids"][1], "cus_2");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerSearch {
    fields: BTreeMap<&'static str, Map<String, Value>>,
    ids: Option<Vec<String>>,
}

impl CustomerSearch {
    /// Empty criteria; matches every customer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text predicate. Several predicates on one field are combined.
    #[must_use]
    pub fn text(mut self, field: TextField, op: TextOp) -> Self {
        let (operator, value) = op.into_parts();
        self.fields
            .entry(field.as_str())
            .or_default()
            .insert(operator.to_string(), Value::String(value));
        self
    }

    /// Restrict to a set of customer IDs.
    #[must_use]
    pub fn ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Customers created at or after `min`.
    #[must_use]
    pub fn created_after(mut self, min: DateTime<Utc>) -> Self {
        self.fields
            .entry("created_at")
            .or_default()
            .insert("min".to_string(), Value::String(timestamp(min)));
        self
    }

    /// Customers created at or before `max`.
    #[must_use]
    pub fn created_before(mut self, max: DateTime<Utc>) -> Self {
        self.fields
            .entry("created_at")
            .or_default()
            .insert("max".to_string(), Value::String(timestamp(max)));
        self
    }

    /// Customers created within `[min, max]`.
    #[must_use]
    pub fn created_between(self, min: DateTime<Utc>, max: DateTime<Utc>) -> Self {
        self.created_after(min).created_before(max)
    }

    /// Whether no criteria have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.ids.is_none()
    }

    /// Request body for the search endpoint.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut criteria: Map<String, Value> = self
            .fields
            .iter()
            .map(|(field, node)| ((*field).to_string(), Value::Object(node.clone())))
            .collect();

        if let Some(ids) = &self.ids {
            let ids = ids.iter().cloned().map(Value::String).collect();
            criteria.insert("ids".to_string(), Value::Array(ids));
        }

        let mut body = Map::new();
        body.insert("search".to_string(), Value::Object(criteria));
        Value::Object(body)
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Run a search against a resource collection.
///
/// Posts `criteria` to `{resource_path}/advanced_search` and feeds the result collection
/// to `constructor`. The collection is read from the response key named after the last
/// segment of `resource_path` (e.g. `customers`); a missing or `null` collection yields
/// no results.
///
/// # Errors
///
/// Returns the transport's error unchanged, or [`ClientError::Normalize`] if the
/// constructor rejects the collection.
pub async fn execute<T, C>(
    transport: &dyn Transport,
    criteria: &Value,
    resource_path: &str,
    constructor: C,
    options: &RequestOptions,
) -> Result<Vec<T>, ClientError>
where
    C: Fn(&Value) -> paygate_core::Result<Shape<T>>,
{
    let path = format!("{}/advanced_search", resource_path.trim_end_matches('/'));
    let response = transport.post(&path, criteria, options).await?;

    let Some(body) = response else {
        return Ok(Vec::new());
    };

    let collection_key = resource_path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    let results = match body {
        Value::Object(mut map) if map.contains_key(collection_key) => {
            map.remove(collection_key).unwrap_or(Value::Null)
        }
        other => other,
    };

    if results.is_null() {
        return Ok(Vec::new());
    }

    let items = constructor(&results)?.into_vec();
    tracing::debug!(path = %path, results = items.len(), "Search completed");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Method;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use paygate_core::Customer;
    use serde_json::json;

    #[derive(Debug)]
    struct CannedTransport(Option<Value>);

    #[async_trait]
    impl Transport for CannedTransport {
        async fn request(
            &self,
            method: Method,
            path: &str,
            _body: Option<&Value>,
            _options: &RequestOptions,
        ) -> Result<Option<Value>, ClientError> {
            assert_eq!(method, Method::Post);
            assert_eq!(path, "/merchants/m/customers/advanced_search");
            Ok(self.0.clone())
        }
    }

    async fn search_ids(body: Option<Value>) -> Vec<Option<String>> {
        execute(
            &CannedTransport(body),
            &CustomerSearch::new().to_body(),
            "/merchants/m/customers",
            Customer::normalize,
            &RequestOptions::new(),
        )
        .await
        .unwrap()
        .into_iter()
        .map(|customer| customer.id)
        .collect()
    }

    #[tokio::test]
    async fn collection_wrapping_an_envelope_is_unwrapped_twice() {
        let ids = search_ids(Some(json!({
            "customers": {"customer": [{"id": "a"}, {"id": "b"}]}
        })))
        .await;
        assert_eq!(ids, vec![Some("a".to_string()), Some("b".to_string())]);
    }

    #[tokio::test]
    async fn bare_collection_list_is_normalized() {
        let ids = search_ids(Some(json!({"customers": [{"id": "a"}]}))).await;
        assert_eq!(ids, vec![Some("a".to_string())]);
    }

    #[tokio::test]
    async fn missing_or_null_collection_yields_no_results() {
        assert!(search_ids(None).await.is_empty());
        assert!(search_ids(Some(json!({"customers": null}))).await.is_empty());
    }

    #[test]
    fn empty_search_body() {
        let search = CustomerSearch::new();
        assert!(search.is_empty());
        assert_eq!(search.to_body(), json!({"search": {}}));
    }

    #[test]
    fn text_predicates_combine_per_field() {
        let search = CustomerSearch::new()
            .text(TextField::FirstName, TextOp::starts_with("Je"))
            .text(TextField::FirstName, TextOp::is_not("Jeff"))
            .text(TextField::Company, TextOp::contains("Soren"));

        assert_eq!(
            search.to_body(),
            json!({"search": {
                "first_name": {"starts_with": "Je", "is_not": "Jeff"},
                "company": {"contains": "Soren"},
            }})
        );
    }

    #[test]
    fn created_range_uses_rfc3339() {
        let min = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let max = Utc.with_ymd_and_hms(2026, 2, 1, 12, 30, 0).unwrap();
        let search = CustomerSearch::new().created_between(min, max);

        assert_eq!(
            search.to_body()["search"]["created_at"],
            json!({"min": "2026-01-01T00:00:00Z", "max": "2026-02-01T12:30:00Z"})
        );
    }

    #[test]
    fn ids_replace_previous_ids() {
        let search = CustomerSearch::new().ids(["a"]).ids(vec!["b".to_string(), "c".to_string()]);
        assert_eq!(search.to_body()["search"]["ids"], json!(["b", "c"]));
    }

    #[test]
    fn text_field_names() {
        assert_eq!(TextField::PaymentMethodToken.as_str(), "payment_method_token");
        assert_eq!(TextField::LastName.as_str(), "last_name");
    }
}
