//! HTTP client for the Persist.Live edge functions.
//!
//! Posts JSON bodies through an [`HttpTransport`] and hands back the buffered
//! reply. Native builds and the browser both use `reqwest`; tests swap in
//! their own transport.
//!
//! # Example
//!
//! ```rust,ignore
//! use landing_data::FetchClient;
//!
//! let response = FetchClient::new()
//!     .post("https://project.supabase.co/functions/v1/join-waitlist")
//!     .json(&serde_json::json!({ "email": "ada@example.com" }))?
//!     .send()
//!     .await?;
//!
//! if response.is_success() {
//!     let reply: serde_json::Value = serde_json::from_slice(response.bytes())?;
//! }
//! ```

mod error;
mod request;
mod response;
mod transport;

use std::sync::Arc;

pub use error::FetchError;
pub use request::RequestBuilder;
pub use response::Response;
pub use transport::{HttpTransport, ReqwestTransport};

/// HTTP client for making outbound requests.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn HttpTransport>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient").finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a new HTTP client backed by `reqwest`.
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }

    /// Create a client over a custom transport.
    pub fn with_transport(transport: impl HttpTransport + 'static) -> Self {
        Self::with_shared_transport(Arc::new(transport))
    }

    /// Create a client over an already shared transport.
    pub fn with_shared_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Start a POST to an absolute URL.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        ClientRequestBuilder {
            builder: RequestBuilder::new(url),
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request builder bound to the client's transport.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn HttpTransport>,
}

impl ClientRequestBuilder {
    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request and return the buffered response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.transport.send(self.builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<RequestBuilder>>,
    }

    #[async_trait]
    impl HttpTransport for Recorder {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push(request);
            Ok(Response::new(204, Vec::new()))
        }
    }

    #[tokio::test]
    async fn test_post_json_reaches_transport() {
        let recorder = Arc::new(Recorder::default());
        let client = FetchClient::with_shared_transport(recorder.clone());

        let resp = client
            .post("https://project.supabase.co/functions/v1/submit-contact")
            .json(&serde_json::json!({"name": "Ada"}))
            .unwrap()
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status, 204);

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].url(),
            "https://project.supabase.co/functions/v1/submit-contact"
        );
        assert_eq!(seen[0].header_value("content-type"), Some("application/json"));
        assert_eq!(seen[0].body_bytes(), Some(br#"{"name":"Ada"}"#.as_slice()));
    }

    #[tokio::test]
    async fn test_clones_share_the_transport() {
        let recorder = Arc::new(Recorder::default());
        let client = FetchClient::with_shared_transport(recorder.clone());
        let other = client.clone();

        client.post("http://a.test/x").send().await.unwrap();
        other.post("http://a.test/y").send().await.unwrap();

        assert_eq!(recorder.seen.lock().unwrap().len(), 2);
    }
}
