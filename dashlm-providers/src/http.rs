//! HTTP client abstraction and utilities

use crate::constants::DEFAULT_TIMEOUT_SECS;
use crate::error;
use crate::utils::{check_response_status, provider_name};
use bytes::Bytes;
use dashlm_core::Error;
use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::pin::Pin;
use std::time::Duration;

/// Type alias for response streams
pub type ResponseStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// HTTP client abstraction
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a POST request and decode the JSON reply
    async fn post(&self, url: &str, headers: HeaderMap, body: Value) -> Result<Value, Error>;

    /// Send a POST request and return the raw body as it arrives
    async fn post_stream(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Value,
    ) -> Result<ResponseStream, Error>;
}

/// Default HTTP client implementation using reqwest
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a new HTTP client with the default timeout
    pub fn new() -> Result<Self, Error> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new HTTP client with a custom overall timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(error::network_error)?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn post(&self, url: &str, headers: HeaderMap, body: Value) -> Result<Value, Error> {
        tracing::debug!(url, "POST");
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(error::network_error)?;

        let response = check_response_status(response, &provider_name(url)).await?;
        let text = response.text().await.map_err(error::network_error)?;
        serde_json::from_str(&text).map_err(error::serialization_error)
    }

    async fn post_stream(
        &self,
        url: &str,
        mut headers: HeaderMap,
        body: Value,
    ) -> Result<ResponseStream, Error> {
        tracing::debug!(url, "POST (streaming)");
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(error::network_error)?;

        let response = check_response_status(response, &provider_name(url)).await?;
        Ok(Box::pin(response.bytes_stream()))
    }
}

/// Helper to create common headers
pub fn create_headers(api_key: &str, additional: Option<HeaderMap>) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| Error::Configuration(format!("Invalid API key: {}", e)))?,
    );

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(additional) = additional {
        headers.extend(additional);
    }

    Ok(headers)
}
