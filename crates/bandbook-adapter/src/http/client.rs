/*
[INPUT]:  HTTP configuration (feed URL, timeouts)
[OUTPUT]: Configured reqwest client ready for feed calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::http::{FeedError, Result};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for a public order book feed
#[derive(Debug, Clone)]
pub struct FeedClient {
    http_client: Client,
    orderbook_url: Url,
}

impl FeedClient {
    /// Create a new client with default configuration
    pub fn new(orderbook_url: &str) -> Result<Self> {
        Self::with_config(orderbook_url, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(orderbook_url: &str, config: ClientConfig) -> Result<Self> {
        if orderbook_url.trim().is_empty() {
            return Err(FeedError::Config("order book url is empty".to_string()));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            orderbook_url: Url::parse(orderbook_url)?,
        })
    }

    pub fn orderbook_url(&self) -> &Url {
        &self.orderbook_url
    }

    /// Build request builder for the order book endpoint
    pub(crate) fn orderbook_request(&self, method: Method) -> RequestBuilder {
        self.http_client.request(method, self.orderbook_url.clone())
    }

    /// Send a request and decode a JSON body; anything but 200 is an error
    pub(crate) async fn send_json<T>(&self, builder: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            debug!(status = status.as_u16(), "feed request rejected");
            return Err(FeedError::status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
