//! The seam between the marshaler and the network.
//!
//! # Design
//! `ApsClient` is generic over `Transport` so pooling, retries and timeouts
//! stay with whoever owns the HTTP stack. A transport returns non-2xx
//! responses as data; status interpretation belongs to the marshaler.

use std::future::Future;
use std::sync::Arc;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use reqwest::{Client, Method};

    use super::Transport;
    use crate::config::ClientConfig;
    use crate::error::{ApiError, TransportError};
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// `Transport` backed by a pooled `reqwest::Client`.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        /// Create a transport honoring the configured timeout.
        ///
        /// # Errors
        ///
        /// Returns error if the HTTP client cannot be created.
        pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
            let client = Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(|e| ApiError::Configuration(format!("failed to create HTTP client: {e}")))?;
            Ok(Self { client })
        }

        /// Wrap an existing client, keeping its pool and policies.
        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let method = match request.method {
                HttpMethod::Get => Method::GET,
                HttpMethod::Post => Method::POST,
                HttpMethod::Put => Method::PUT,
                HttpMethod::Patch => Method::PATCH,
                HttpMethod::Delete => Method::DELETE,
            };

            let mut builder = self.client.request(method, &request.url);
            for (name, value) in request.headers.iter().chain(&request.content_headers) {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(transport_error)?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect();
            let body = response.text().await.map_err(transport_error)?;

            Ok(HttpResponse { status, headers, body })
        }
    }

    fn transport_error(err: reqwest::Error) -> TransportError {
        let mut error = TransportError::new(err.to_string());
        error.timed_out = err.is_timeout();
        error.source = Some(Box::new(err));
        error
    }

}
