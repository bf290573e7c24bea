//! Webhook secret token, used by the service to sign callback payloads.

use crate::api::{DATA_READ, DATA_WRITE, WEBHOOKS};
use crate::client::ApsClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::marshal::{ApiResponse, Operation, Params, JSON};
use crate::models::{Region, Token, TokenPayload};
use crate::transport::Transport;

const CREATE_TOKEN: Operation = Operation::new(WEBHOOKS, "createToken", HttpMethod::Post, "/webhooks/v1/tokens")
    .scopes(DATA_READ)
    .content_type(JSON);
const PUT_TOKEN: Operation = Operation::new(WEBHOOKS, "putToken", HttpMethod::Put, "/webhooks/v1/tokens/@me")
    .scopes(DATA_WRITE)
    .content_type(JSON);
const DELETE_TOKEN: Operation =
    Operation::new(WEBHOOKS, "deleteToken", HttpMethod::Delete, "/webhooks/v1/tokens/@me").scopes(DATA_WRITE);

pub struct TokensApi<'a, T> {
    client: &'a ApsClient<T>,
}

impl<'a, T> TokensApi<'a, T> {
    pub(crate) fn new(client: &'a ApsClient<T>) -> Self {
        Self { client }
    }

    fn params(&self, region: Option<Region>) -> Params {
        Params::new().header("x-ads-region", self.client.region_or_default(region))
    }

    pub fn build_create_token(
        &self,
        payload: &TokenPayload,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.client
            .marshaler()
            .build_with_body(&CREATE_TOKEN, &self.params(region), payload, access_token)
    }

    pub fn build_put_token(
        &self,
        payload: &TokenPayload,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.client
            .marshaler()
            .build_with_body(&PUT_TOKEN, &self.params(region), payload, access_token)
    }

    pub fn build_delete_token(&self, region: Option<Region>, access_token: &str) -> Result<HttpRequest, ApiError> {
        self.client.marshaler().build(&DELETE_TOKEN, &self.params(region), access_token)
    }
}

impl<T: Transport> TokensApi<'_, T> {
    /// Set the secret token for the calling application.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn create_token(
        &self,
        payload: &TokenPayload,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<ApiResponse<Token>, ApiError> {
        self.client
            .call(self.build_create_token(payload, region, access_token)?)
            .await
    }

    /// Replace the secret token. Hooks pick up the new value within minutes.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub async fn put_token(
        &self,
        payload: &TokenPayload,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .call_raw(self.build_put_token(payload, region, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub async fn delete_token(&self, region: Option<Region>, access_token: &str) -> Result<HttpResponse, ApiError> {
        self.client.call_raw(self.build_delete_token(region, access_token)?).await
    }
}
