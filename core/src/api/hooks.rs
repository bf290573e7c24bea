//! Webhooks: callbacks registered against system events.
//!
//! Every operation takes an optional `region`; when absent the client's
//! configured region is sent, and when neither is set the `x-ads-region`
//! header is left out and the service defaults to US.

use crate::api::{DATA_READ, DATA_WRITE, WEBHOOKS};
use crate::client::ApsClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::marshal::{ApiResponse, Operation, Params, JSON};
use crate::models::{
    CreatedHooks, Hook, HookPayload, HookStatus, Hooks, ModifyHookPayload, Region, SortOrder, WebhookSystem,
};
use crate::params::WireEnum;
use crate::transport::Transport;

const GET_HOOKS: Operation = Operation::new(WEBHOOKS, "getHooks", HttpMethod::Get, "/webhooks/v1/hooks").scopes(DATA_READ);
const GET_APP_HOOKS: Operation =
    Operation::new(WEBHOOKS, "getAppHooks", HttpMethod::Get, "/webhooks/v1/app/hooks").scopes(DATA_READ);
const GET_SYSTEM_HOOKS: Operation =
    Operation::new(WEBHOOKS, "getSystemHooks", HttpMethod::Get, "/webhooks/v1/systems/{system}/hooks")
        .scopes(DATA_READ);
const GET_SYSTEM_EVENT_HOOKS: Operation = Operation::new(
    WEBHOOKS,
    "getSystemEventHooks",
    HttpMethod::Get,
    "/webhooks/v1/systems/{system}/events/{event}/hooks",
)
.scopes(DATA_READ);
const GET_HOOK_DETAILS: Operation = Operation::new(
    WEBHOOKS,
    "getHookDetails",
    HttpMethod::Get,
    "/webhooks/v1/systems/{system}/events/{event}/hooks/{hook_id}",
)
.scopes(DATA_READ);
const CREATE_SYSTEM_HOOK: Operation =
    Operation::new(WEBHOOKS, "createSystemHook", HttpMethod::Post, "/webhooks/v1/systems/{system}/hooks")
        .scopes(DATA_READ)
        .content_type(JSON);
const CREATE_SYSTEM_EVENT_HOOK: Operation = Operation::new(
    WEBHOOKS,
    "createSystemEventHook",
    HttpMethod::Post,
    "/webhooks/v1/systems/{system}/events/{event}/hooks",
)
.scopes(DATA_READ)
.content_type(JSON);
const PATCH_SYSTEM_EVENT_HOOK: Operation = Operation::new(
    WEBHOOKS,
    "patchSystemEventHook",
    HttpMethod::Patch,
    "/webhooks/v1/systems/{system}/events/{event}/hooks/{hook_id}",
)
.scopes(DATA_WRITE)
.content_type(JSON);
const DELETE_SYSTEM_EVENT_HOOK: Operation = Operation::new(
    WEBHOOKS,
    "deleteSystemEventHook",
    HttpMethod::Delete,
    "/webhooks/v1/systems/{system}/events/{event}/hooks/{hook_id}",
)
.scopes(DATA_WRITE);

/// Paging and status filter for hook listings.
#[derive(Debug, Clone, Default)]
pub struct HooksQuery {
    /// Opaque cursor from `Hooks::next_page_state`.
    pub page_state: Option<String>,
    pub status: Option<HookStatus>,
    pub region: Option<Region>,
}

/// Hooks created by the calling application.
#[derive(Debug, Clone, Default)]
pub struct AppHooksQuery {
    pub page_state: Option<String>,
    pub status: Option<HookStatus>,
    /// Order by creation date.
    pub sort: Option<SortOrder>,
    pub region: Option<Region>,
}

#[derive(Debug, Clone, Default)]
pub struct SystemEventHooksQuery {
    /// Only hooks whose scope has this key, e.g. `folder`.
    pub scope_name: Option<String>,
    pub page_state: Option<String>,
    pub status: Option<HookStatus>,
    pub region: Option<Region>,
}

pub struct HooksApi<'a, T> {
    client: &'a ApsClient<T>,
}

impl<'a, T> HooksApi<'a, T> {
    pub(crate) fn new(client: &'a ApsClient<T>) -> Self {
        Self { client }
    }

    fn base_params(&self, region: Option<Region>) -> Params {
        Params::new().header("x-ads-region", self.client.region_or_default(region))
    }

    fn event_params(&self, system: WebhookSystem, event: &str, region: Option<Region>) -> Params {
        self.base_params(region)
            .path("system", system.wire_value())
            .path("event", event)
    }

    pub fn build_get_hooks(&self, query: &HooksQuery, access_token: &str) -> Result<HttpRequest, ApiError> {
        let params = self
            .base_params(query.region)
            .query("pageState", query.page_state.as_deref())
            .query("status", query.status);
        self.client.marshaler().build(&GET_HOOKS, &params, access_token)
    }

    pub fn build_get_app_hooks(&self, query: &AppHooksQuery, access_token: &str) -> Result<HttpRequest, ApiError> {
        let params = self
            .base_params(query.region)
            .query("pageState", query.page_state.as_deref())
            .query("status", query.status)
            .query("sort", query.sort);
        self.client.marshaler().build(&GET_APP_HOOKS, &params, access_token)
    }

    pub fn build_get_system_hooks(
        &self,
        system: WebhookSystem,
        query: &HooksQuery,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = self
            .base_params(query.region)
            .path("system", system.wire_value())
            .query("status", query.status)
            .query("pageState", query.page_state.as_deref());
        self.client.marshaler().build(&GET_SYSTEM_HOOKS, &params, access_token)
    }

    pub fn build_get_system_event_hooks(
        &self,
        system: WebhookSystem,
        event: &str,
        query: &SystemEventHooksQuery,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = self
            .event_params(system, event, query.region)
            .query("scopeName", query.scope_name.as_deref())
            .query("pageState", query.page_state.as_deref())
            .query("status", query.status);
        self.client.marshaler().build(&GET_SYSTEM_EVENT_HOOKS, &params, access_token)
    }

    pub fn build_get_hook_details(
        &self,
        system: WebhookSystem,
        event: &str,
        hook_id: &str,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = self.event_params(system, event, region).path("hook_id", hook_id);
        self.client.marshaler().build(&GET_HOOK_DETAILS, &params, access_token)
    }

    pub fn build_create_system_hook(
        &self,
        system: WebhookSystem,
        payload: &HookPayload,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = self.base_params(region).path("system", system.wire_value());
        self.client
            .marshaler()
            .build_with_body(&CREATE_SYSTEM_HOOK, &params, payload, access_token)
    }

    pub fn build_create_system_event_hook(
        &self,
        system: WebhookSystem,
        event: &str,
        payload: &HookPayload,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = self.event_params(system, event, region);
        self.client
            .marshaler()
            .build_with_body(&CREATE_SYSTEM_EVENT_HOOK, &params, payload, access_token)
    }

    pub fn build_patch_system_event_hook(
        &self,
        system: WebhookSystem,
        event: &str,
        hook_id: &str,
        payload: &ModifyHookPayload,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = self.event_params(system, event, region).path("hook_id", hook_id);
        self.client
            .marshaler()
            .build_with_body(&PATCH_SYSTEM_EVENT_HOOK, &params, payload, access_token)
    }

    pub fn build_delete_system_event_hook(
        &self,
        system: WebhookSystem,
        event: &str,
        hook_id: &str,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = self.event_params(system, event, region).path("hook_id", hook_id);
        self.client.marshaler().build(&DELETE_SYSTEM_EVENT_HOOK, &params, access_token)
    }
}

impl<T: Transport> HooksApi<'_, T> {
    /// Hooks across every system visible to the token.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_hooks(&self, query: &HooksQuery, access_token: &str) -> Result<ApiResponse<Hooks>, ApiError> {
        self.client.call(self.build_get_hooks(query, access_token)?).await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_app_hooks(
        &self,
        query: &AppHooksQuery,
        access_token: &str,
    ) -> Result<ApiResponse<Hooks>, ApiError> {
        self.client.call(self.build_get_app_hooks(query, access_token)?).await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_system_hooks(
        &self,
        system: WebhookSystem,
        query: &HooksQuery,
        access_token: &str,
    ) -> Result<ApiResponse<Hooks>, ApiError> {
        self.client
            .call(self.build_get_system_hooks(system, query, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_system_event_hooks(
        &self,
        system: WebhookSystem,
        event: &str,
        query: &SystemEventHooksQuery,
        access_token: &str,
    ) -> Result<ApiResponse<Hooks>, ApiError> {
        self.client
            .call(self.build_get_system_event_hooks(system, event, query, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_hook_details(
        &self,
        system: WebhookSystem,
        event: &str,
        hook_id: &str,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<ApiResponse<Hook>, ApiError> {
        self.client
            .call(self.build_get_hook_details(system, event, hook_id, region, access_token)?)
            .await
    }

    /// Subscribe to every event of a system at once.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn create_system_hook(
        &self,
        system: WebhookSystem,
        payload: &HookPayload,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<ApiResponse<CreatedHooks>, ApiError> {
        self.client
            .call(self.build_create_system_hook(system, payload, region, access_token)?)
            .await
    }

    /// Subscribe to one event. The service answers 201 with the new hook's
    /// path in `Location` and no body.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub async fn create_system_event_hook(
        &self,
        system: WebhookSystem,
        event: &str,
        payload: &HookPayload,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .call_raw(self.build_create_system_event_hook(system, event, payload, region, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub async fn patch_system_event_hook(
        &self,
        system: WebhookSystem,
        event: &str,
        hook_id: &str,
        payload: &ModifyHookPayload,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_patch_system_event_hook(system, event, hook_id, payload, region, access_token)?;
        self.client.call_raw(request).await
    }

    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub async fn delete_system_event_hook(
        &self,
        system: WebhookSystem,
        event: &str,
        hook_id: &str,
        region: Option<Region>,
        access_token: &str,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .call_raw(self.build_delete_system_event_hook(system, event, hook_id, region, access_token)?)
            .await
    }
}
