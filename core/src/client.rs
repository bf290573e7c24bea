//! The client handle: configuration, marshaler and an injected transport.
//!
//! # Design
//! `ApsClient` holds only immutable state. Request building needs nothing
//! but the marshaler, so every `build_*` method works on any `ApsClient<T>`;
//! the async methods additionally require `T: Transport`. Callers that run
//! their own HTTP stack can build requests here, execute them, and hand the
//! responses to `marshal::interpret`.

use serde::de::DeserializeOwned;

use crate::api::{
    CommandsApi, FoldersApi, HooksApi, HubsApi, ItemsApi, ProjectsApi, TokensApi, VersionsApi,
};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::marshal::{interpret, interpret_raw, ApiResponse, Marshaler};
use crate::models::Region;
use crate::transport::Transport;

/// Entry point to every API group.
#[derive(Debug, Clone)]
pub struct ApsClient<T> {
    marshaler: Marshaler,
    region: Option<Region>,
    transport: T,
}

impl<T> ApsClient<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            marshaler: Marshaler::new(&config.base_url),
            region: config.region,
            transport,
        }
    }

    pub fn marshaler(&self) -> &Marshaler {
        &self.marshaler
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `region` if given, else the configured default.
    pub(crate) fn region_or_default(&self, region: Option<Region>) -> Option<Region> {
        region.or(self.region)
    }

    pub fn hubs(&self) -> HubsApi<'_, T> {
        HubsApi::new(self)
    }

    pub fn projects(&self) -> ProjectsApi<'_, T> {
        ProjectsApi::new(self)
    }

    pub fn folders(&self) -> FoldersApi<'_, T> {
        FoldersApi::new(self)
    }

    pub fn items(&self) -> ItemsApi<'_, T> {
        ItemsApi::new(self)
    }

    pub fn versions(&self) -> VersionsApi<'_, T> {
        VersionsApi::new(self)
    }

    pub fn commands(&self) -> CommandsApi<'_, T> {
        CommandsApi::new(self)
    }

    pub fn hooks(&self) -> HooksApi<'_, T> {
        HooksApi::new(self)
    }

    pub fn tokens(&self) -> TokensApi<'_, T> {
        TokensApi::new(self)
    }
}

impl<T: Transport> ApsClient<T> {
    /// Send a request and return the response whatever its status.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if no response was received.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        tracing::trace!(%method, %url, "entered");

        match self.transport.send(request).await {
            Ok(response) => {
                tracing::trace!(%method, %url, status = response.status, "exited");
                Ok(response)
            }
            Err(err) => {
                tracing::error!(%method, %url, timed_out = err.timed_out, error = %err, "transport failed");
                Err(err.into())
            }
        }
    }

    /// Send a request and deserialize a 2xx body into `R`.
    ///
    /// # Errors
    ///
    /// Transport failures, non-2xx statuses and undecodable bodies.
    pub async fn call<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<ApiResponse<R>, ApiError> {
        interpret(self.execute(request).await?)
    }

    /// Send a request whose result is the response itself.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx statuses.
    pub async fn call_raw(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        interpret_raw(self.execute(request).await?)
    }
}

#[cfg(feature = "reqwest")]
impl ApsClient<crate::transport::ReqwestTransport> {
    /// Client backed by a reqwest transport built from `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = crate::transport::ReqwestTransport::new(config)?;
        Ok(Self::new(config, transport))
    }
}
