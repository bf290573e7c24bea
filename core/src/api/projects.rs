//! Projects of a hub, their top folders, downloads and storage locations.

use crate::api::{DATA_CREATE, DATA_MANAGEMENT, DATA_READ};
use crate::client::ApsClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::marshal::{ApiResponse, Operation, Params, JSON_API};
use crate::models::{
    CreatedDownload, Download, DownloadPayload, Hub, Job, Project, Projects, Storage, StoragePayload, TopFolders,
};
use crate::transport::Transport;

const GET_HUB_PROJECTS: Operation =
    Operation::new(DATA_MANAGEMENT, "getHubProjects", HttpMethod::Get, "/project/v1/hubs/{hub_id}/projects")
        .scopes(DATA_READ);
const GET_PROJECT: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getProject",
    HttpMethod::Get,
    "/project/v1/hubs/{hub_id}/projects/{project_id}",
)
.scopes(DATA_READ);
const GET_PROJECT_HUB: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getProjectHub",
    HttpMethod::Get,
    "/project/v1/hubs/{hub_id}/projects/{project_id}/hub",
)
.scopes(DATA_READ);
const GET_PROJECT_TOP_FOLDERS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getProjectTopFolders",
    HttpMethod::Get,
    "/project/v1/hubs/{hub_id}/projects/{project_id}/topFolders",
)
.scopes(DATA_READ);
const GET_DOWNLOAD: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getDownload",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/downloads/{download_id}",
)
.scopes(DATA_READ);
const GET_DOWNLOAD_JOB: Operation =
    Operation::new(DATA_MANAGEMENT, "getDownloadJob", HttpMethod::Get, "/data/v1/projects/{project_id}/jobs/{job_id}")
        .scopes(DATA_READ);
const START_DOWNLOAD: Operation =
    Operation::new(DATA_MANAGEMENT, "startDownload", HttpMethod::Post, "/data/v1/projects/{project_id}/downloads")
        .scopes(DATA_READ)
        .content_type(JSON_API);
const CREATE_STORAGE: Operation =
    Operation::new(DATA_MANAGEMENT, "createStorage", HttpMethod::Post, "/data/v1/projects/{project_id}/storage")
        .scopes(DATA_CREATE)
        .content_type(JSON_API);

/// Filters and paging for listing the projects of a hub.
#[derive(Debug, Clone, Default)]
pub struct ProjectsQuery {
    pub x_user_id: Option<String>,
    pub filter_id: Vec<String>,
    pub filter_extension_type: Vec<String>,
    /// Zero-based page index. Zero is never sent, so the first page is the
    /// service default.
    pub page_number: i32,
    pub page_limit: i32,
}

#[derive(Debug, Clone, Default)]
pub struct TopFoldersQuery {
    pub x_user_id: Option<String>,
    pub exclude_deleted: Option<bool>,
    pub project_files_only: Option<bool>,
}

pub struct ProjectsApi<'a, T> {
    client: &'a ApsClient<T>,
}

impl<'a, T> ProjectsApi<'a, T> {
    pub(crate) fn new(client: &'a ApsClient<T>) -> Self {
        Self { client }
    }

    pub fn build_get_hub_projects(
        &self,
        hub_id: &str,
        query: &ProjectsQuery,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .path("hub_id", hub_id)
            .header("x-user-id", query.x_user_id.as_deref())
            .query("filter[id]", query.filter_id.as_slice())
            .query("filter[extension.type]", query.filter_extension_type.as_slice())
            .query("page[number]", query.page_number)
            .query("page[limit]", query.page_limit);
        self.client.marshaler().build(&GET_HUB_PROJECTS, &params, access_token)
    }

    pub fn build_get_project(
        &self,
        hub_id: &str,
        project_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .path("hub_id", hub_id)
            .path("project_id", project_id)
            .header("x-user-id", x_user_id);
        self.client.marshaler().build(&GET_PROJECT, &params, access_token)
    }

    pub fn build_get_project_hub(
        &self,
        hub_id: &str,
        project_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .path("hub_id", hub_id)
            .path("project_id", project_id)
            .header("x-user-id", x_user_id);
        self.client.marshaler().build(&GET_PROJECT_HUB, &params, access_token)
    }

    pub fn build_get_project_top_folders(
        &self,
        hub_id: &str,
        project_id: &str,
        query: &TopFoldersQuery,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .path("hub_id", hub_id)
            .path("project_id", project_id)
            .header("x-user-id", query.x_user_id.as_deref())
            .query("excludeDeleted", query.exclude_deleted)
            .query("projectFilesOnly", query.project_files_only);
        self.client.marshaler().build(&GET_PROJECT_TOP_FOLDERS, &params, access_token)
    }

    pub fn build_get_download(
        &self,
        project_id: &str,
        download_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .path("project_id", project_id)
            .path("download_id", download_id)
            .header("x-user-id", x_user_id);
        self.client.marshaler().build(&GET_DOWNLOAD, &params, access_token)
    }

    pub fn build_get_download_job(
        &self,
        project_id: &str,
        job_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .path("project_id", project_id)
            .path("job_id", job_id)
            .header("x-user-id", x_user_id);
        self.client.marshaler().build(&GET_DOWNLOAD_JOB, &params, access_token)
    }

    pub fn build_start_download(
        &self,
        project_id: &str,
        payload: &DownloadPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new().path("project_id", project_id).header("x-user-id", x_user_id);
        self.client
            .marshaler()
            .build_with_body(&START_DOWNLOAD, &params, payload, access_token)
    }

    pub fn build_create_storage(
        &self,
        project_id: &str,
        payload: &StoragePayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new().path("project_id", project_id).header("x-user-id", x_user_id);
        self.client
            .marshaler()
            .build_with_body(&CREATE_STORAGE, &params, payload, access_token)
    }
}

impl<T: Transport> ProjectsApi<'_, T> {
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_hub_projects(
        &self,
        hub_id: &str,
        query: &ProjectsQuery,
        access_token: &str,
    ) -> Result<ApiResponse<Projects>, ApiError> {
        self.client.call(self.build_get_hub_projects(hub_id, query, access_token)?).await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_project(
        &self,
        hub_id: &str,
        project_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Project>, ApiError> {
        self.client
            .call(self.build_get_project(hub_id, project_id, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_project_hub(
        &self,
        hub_id: &str,
        project_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Hub>, ApiError> {
        self.client
            .call(self.build_get_project_hub(hub_id, project_id, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_project_top_folders(
        &self,
        hub_id: &str,
        project_id: &str,
        query: &TopFoldersQuery,
        access_token: &str,
    ) -> Result<ApiResponse<TopFolders>, ApiError> {
        self.client
            .call(self.build_get_project_top_folders(hub_id, project_id, query, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_download(
        &self,
        project_id: &str,
        download_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Download>, ApiError> {
        self.client
            .call(self.build_get_download(project_id, download_id, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_download_job(
        &self,
        project_id: &str,
        job_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Job>, ApiError> {
        self.client
            .call(self.build_get_download_job(project_id, job_id, x_user_id, access_token)?)
            .await
    }

    /// Queue a conversion of a version into a downloadable format.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn start_download(
        &self,
        project_id: &str,
        payload: &DownloadPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<CreatedDownload>, ApiError> {
        self.client
            .call(self.build_start_download(project_id, payload, x_user_id, access_token)?)
            .await
    }

    /// Reserve an OSS object to upload a new file or version into.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn create_storage(
        &self,
        project_id: &str,
        payload: &StoragePayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Storage>, ApiError> {
        self.client
            .call(self.build_create_storage(project_id, payload, x_user_id, access_token)?)
            .await
    }
}
