//! Customer resource operations.

use paygate_core::Customer;
use serde_json::Value;
use std::sync::Arc;

use crate::error::ClientError;
use crate::search::{self, CustomerSearch};
use crate::transport::{RequestOptions, Transport};
use crate::types::{CustomerEnvelope, CustomerRequest};

/// Collection path of the customer resource.
pub const CUSTOMERS_PATH: &str = "/customers";

/// Create, find, update, delete and search customers.
///
/// Each operation makes exactly one transport call. Successful responses are normalized
/// into [`Customer`] values; transport errors are returned unchanged.
#[derive(Debug, Clone)]
pub struct CustomerGateway {
    transport: Arc<dyn Transport>,
}

impl CustomerGateway {
    /// Create a gateway over a transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the gateway rejects the attributes, or any
    /// other transport error.
    pub async fn create(
        &self,
        params: &CustomerRequest,
        options: &RequestOptions,
    ) -> Result<Customer, ClientError> {
        let body = serde_json::to_value(CustomerEnvelope { customer: params })?;
        let response = self.transport.post(CUSTOMERS_PATH, &body, options).await?;
        let customer = single_customer(response)?;

        tracing::info!(customer_id = ?customer.id, "Created customer");
        Ok(customer)
    }

    /// Find a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if no customer has this ID (including a blank ID),
    /// or [`ClientError::InvalidArgument`] if the ID contains unsupported characters.
    pub async fn find(&self, id: &str, options: &RequestOptions) -> Result<Customer, ClientError> {
        let path = customer_path(id)?;
        let response = self.transport.get(&path, options).await?;
        single_customer(response)
    }

    /// Update a customer. Attributes absent from `params` are left unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find) for the ID, plus validation errors from the gateway.
    pub async fn update(
        &self,
        id: &str,
        params: &CustomerRequest,
        options: &RequestOptions,
    ) -> Result<Customer, ClientError> {
        let path = customer_path(id)?;
        let body = serde_json::to_value(CustomerEnvelope { customer: params })?;
        let response = self.transport.put(&path, &body, options).await?;
        single_customer(response)
    }

    /// Delete a customer.
    ///
    /// The gateway also removes the customer's payment methods and cancels its
    /// subscriptions.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find).
    pub async fn delete(&self, id: &str, options: &RequestOptions) -> Result<(), ClientError> {
        let path = customer_path(id)?;
        self.transport.delete(&path, options).await?;

        tracing::info!(customer_id = %id, "Deleted customer");
        Ok(())
    }

    /// Search for customers.
    ///
    /// # Errors
    ///
    /// Returns the transport's error, or [`ClientError::Normalize`] if the result
    /// collection has an unexpected shape.
    pub async fn search(
        &self,
        criteria: &CustomerSearch,
        options: &RequestOptions,
    ) -> Result<Vec<Customer>, ClientError> {
        search::execute(
            self.transport.as_ref(),
            &criteria.to_body(),
            CUSTOMERS_PATH,
            Customer::normalize,
            options,
        )
        .await
    }

    /// Every customer of the merchant.
    ///
    /// # Errors
    ///
    /// Same as [`search`](Self::search).
    pub async fn all(&self, options: &RequestOptions) -> Result<Vec<Customer>, ClientError> {
        self.search(&CustomerSearch::new(), options).await
    }
}

fn customer_path(id: &str) -> Result<String, ClientError> {
    if id.trim().is_empty() {
        return Err(ClientError::NotFound {
            message: "customer id cannot be blank".to_string(),
        });
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ClientError::InvalidArgument(format!(
            "customer id contains invalid characters: {id:?}"
        )));
    }
    Ok(format!("{CUSTOMERS_PATH}/{id}"))
}

fn single_customer(response: Option<Value>) -> Result<Customer, ClientError> {
    let body = response
        .ok_or_else(|| ClientError::UnexpectedResponse("empty response body".to_string()))?;

    Customer::normalize(&body)?.into_one().ok_or_else(|| {
        ClientError::UnexpectedResponse("expected one customer, found a list".to_string())
    })
}
