//! Transport seam between the client and the network.

use async_trait::async_trait;
use landing_core::MaybeSendSync;

use crate::{FetchError, RequestBuilder, Response};

/// Sends a fully built request and buffers the response.
///
/// Any status code is a successful send; only failures to obtain a response
/// are errors.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait HttpTransport: MaybeSendSync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// `reqwest`-backed transport. Uses the browser fetch API on `wasm32`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_builder() {
        return FetchError::InvalidUrl(err.to_string());
    }
    if err.is_timeout() {
        return FetchError::Timeout;
    }
    #[cfg(not(target_arch = "wasm32"))]
    if err.is_connect() {
        return FetchError::Connection(err.to_string());
    }
    FetchError::RequestError(err.to_string())
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let mut builder = self.client.post(&request.url);

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::ParseError(e.to_string()))?
            .to_vec();

        Ok(Response::new(status, body))
    }
}
