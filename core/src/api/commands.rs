//! Commands: batch operations such as `CheckPermission` or `ListRefs`.

use crate::api::{DATA_MANAGEMENT, DATA_READ};
use crate::client::ApsClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::marshal::{ApiResponse, Operation, Params, JSON_API};
use crate::models::{Command, CommandPayload};
use crate::transport::Transport;

const EXECUTE_COMMAND: Operation =
    Operation::new(DATA_MANAGEMENT, "executeCommand", HttpMethod::Post, "/data/v1/projects/{project_id}/commands")
        .scopes(DATA_READ)
        .content_type(JSON_API);

pub struct CommandsApi<'a, T> {
    client: &'a ApsClient<T>,
}

impl<'a, T> CommandsApi<'a, T> {
    pub(crate) fn new(client: &'a ApsClient<T>) -> Self {
        Self { client }
    }

    pub fn build_execute_command(
        &self,
        project_id: &str,
        payload: &CommandPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new().path("project_id", project_id).header("x-user-id", x_user_id);
        self.client
            .marshaler()
            .build_with_body(&EXECUTE_COMMAND, &params, payload, access_token)
    }
}

impl<T: Transport> CommandsApi<'_, T> {
    /// Run a command. The command kind lives in `attributes.extension.type`.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn execute_command(
        &self,
        project_id: &str,
        payload: &CommandPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Command>, ApiError> {
        self.client
            .call(self.build_execute_command(project_id, payload, x_user_id, access_token)?)
            .await
    }
}
