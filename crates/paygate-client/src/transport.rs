//! Transport abstraction and its HTTP implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::error::ClientError;
use crate::types::{ApiErrorEnvelope, ErrorResponse};

/// Gateway API version sent with every request.
pub const API_VERSION: &str = "6";

/// HTTP method of a gateway request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Method name in upper case.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// Per-request options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Overrides the client timeout for this request.
    pub timeout: Option<Duration>,
    /// Extra headers to send.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Options with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a timeout for this request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Sends requests to the gateway and decodes responses.
///
/// Implementations map every non-success response to a [`ClientError`]; a successful
/// response yields its decoded body, or `None` when the body is empty.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send one request.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<Option<Value>, ClientError>;

    /// `GET path`.
    async fn get(&self, path: &str, options: &RequestOptions) -> Result<Option<Value>, ClientError> {
        self.request(Method::Get, path, None, options).await
    }

    /// `POST path` with a JSON body.
    async fn post(
        &self,
        path: &str,
        body: &Value,
        options: &RequestOptions,
    ) -> Result<Option<Value>, ClientError> {
        self.request(Method::Post, path, Some(body), options).await
    }

    /// `PUT path` with a JSON body.
    async fn put(
        &self,
        path: &str,
        body: &Value,
        options: &RequestOptions,
    ) -> Result<Option<Value>, ClientError> {
        self.request(Method::Put, path, Some(body), options).await
    }

    /// `DELETE path`.
    async fn delete(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Option<Value>, ClientError> {
        self.request(Method::Delete, path, None, options).await
    }
}

/// Gateway transport over HTTPS.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    merchant_url: String,
    public_key: String,
    private_key: String,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("merchant_url", &self.merchant_url)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Create a transport for a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            merchant_url: config.merchant_url(),
            public_key: config.public_key.clone(),
            private_key: config.private_key.clone(),
        })
    }

    /// Root URL requests are resolved against.
    #[must_use]
    pub fn merchant_url(&self) -> &str {
        &self.merchant_url
    }

    /// Handle API response and convert errors.
    async fn handle_response(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<Option<Value>, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(None);
            }
            return Ok(Some(serde_json::from_slice(&body)?));
        }

        tracing::warn!(status = %status, path = %path, "Gateway request failed");

        // Try to parse error response
        let api_error = serde_json::from_slice::<ApiErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.api_error_response);

        match (status.as_u16(), api_error) {
            (401, _) => Err(ClientError::Authentication {
                status: status.as_u16(),
            }),
            (403, _) => Err(ClientError::Authorization {
                status: status.as_u16(),
            }),
            (404, api_error) => Err(ClientError::NotFound {
                message: message_or(api_error, || format!("resource not found: {path}")),
            }),
            (422, Some(response)) => Err(ClientError::Validation(response)),
            (code, api_error) => Err(ClientError::Api {
                status: code,
                message: message_or(api_error, || format!("HTTP {status}")),
            }),
        }
    }
}

fn message_or(api_error: Option<ErrorResponse>, fallback: impl FnOnce() -> String) -> String {
    api_error
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(fallback)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<Option<Value>, ClientError> {
        let url = format!("{}{}", self.merchant_url, path);
        let request_id = Uuid::new_v4();

        let mut request = self
            .client
            .request(method.into(), &url)
            .basic_auth(&self.public_key, Some(&self.private_key))
            .header("accept", "application/json")
            .header("x-api-version", API_VERSION)
            .header("x-request-id", request_id.to_string());

        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(
            method = %method,
            path = %path,
            request_id = %request_id,
            "Sending gateway request"
        );

        let response = request.send().await?;
        self.handle_response(path, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    fn config() -> GatewayConfig {
        GatewayConfig::new(Environment::Sandbox, "merchant_1", "pub", "priv")
    }

    #[test]
    fn transport_creation() {
        let transport = HttpTransport::new(&config()).unwrap();
        assert_eq!(
            transport.merchant_url(),
            "https://api.sandbox.paygate.com/merchants/merchant_1"
        );
    }

    #[test]
    fn debug_hides_private_key() {
        let transport = HttpTransport::new(&config()).unwrap();
        assert!(!format!("{transport:?}").contains("priv\""));
    }

    #[test]
    fn method_conversion() {
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn request_options_builder() {
        let options = RequestOptions::new()
            .with_timeout(Duration::from_secs(5))
            .with_header("x-trace", "abc");
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
        assert_eq!(options.headers, vec![("x-trace".to_string(), "abc".to_string())]);
    }
}
