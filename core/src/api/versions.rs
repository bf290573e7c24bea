//! Versions: immutable snapshots of an item, their downloads and references.

use crate::api::{RefsQuery, RelationshipRefsQuery, DATA_CREATE, DATA_MANAGEMENT, DATA_READ, DATA_WRITE};
use crate::client::ApsClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::marshal::{ApiResponse, Operation, Params, JSON_API};
use crate::models::{
    CreatedVersion, DownloadFormats, Downloads, Item, ModifyPayload, Refs, RelationshipLinks, RelationshipRefs,
    RelationshipRefsPayload, Version, VersionPayload,
};
use crate::transport::Transport;

const GET_VERSION: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getVersion",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/versions/{version_id}",
)
.scopes(DATA_READ);
const GET_VERSION_DOWNLOAD_FORMATS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getVersionDownloadFormats",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/versions/{version_id}/downloadFormats",
)
.scopes(DATA_READ);
const GET_VERSION_DOWNLOADS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getVersionDownloads",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/versions/{version_id}/downloads",
)
.scopes(DATA_READ);
const GET_VERSION_ITEM: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getVersionItem",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/versions/{version_id}/item",
)
.scopes(DATA_READ);
const GET_VERSION_REFS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getVersionRefs",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/versions/{version_id}/refs",
)
.scopes(DATA_READ);
const GET_VERSION_RELATIONSHIPS_LINKS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getVersionRelationshipsLinks",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/versions/{version_id}/relationships/links",
)
.scopes(DATA_READ);
const GET_VERSION_RELATIONSHIPS_REFS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getVersionRelationshipsRefs",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/versions/{version_id}/relationships/refs",
)
.scopes(DATA_READ);
const CREATE_VERSION: Operation =
    Operation::new(DATA_MANAGEMENT, "createVersion", HttpMethod::Post, "/data/v1/projects/{project_id}/versions")
        .scopes(DATA_CREATE)
        .content_type(JSON_API);
const CREATE_VERSION_RELATIONSHIPS_REF: Operation = Operation::new(
    DATA_MANAGEMENT,
    "createVersionRelationshipsRef",
    HttpMethod::Post,
    "/data/v1/projects/{project_id}/versions/{version_id}/relationships/refs",
)
.scopes(DATA_CREATE)
.content_type(JSON_API);
const PATCH_VERSION: Operation = Operation::new(
    DATA_MANAGEMENT,
    "patchVersion",
    HttpMethod::Patch,
    "/data/v1/projects/{project_id}/versions/{version_id}",
)
.scopes(DATA_WRITE)
.content_type(JSON_API);

pub struct VersionsApi<'a, T> {
    client: &'a ApsClient<T>,
}

impl<'a, T> VersionsApi<'a, T> {
    pub(crate) fn new(client: &'a ApsClient<T>) -> Self {
        Self { client }
    }

    fn version_params(project_id: &str, version_id: &str, x_user_id: Option<&str>) -> Params {
        Params::new()
            .path("project_id", project_id)
            .path("version_id", version_id)
            .header("x-user-id", x_user_id)
    }

    pub fn build_get_version(
        &self,
        project_id: &str,
        version_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::version_params(project_id, version_id, x_user_id);
        self.client.marshaler().build(&GET_VERSION, &params, access_token)
    }

    pub fn build_get_version_download_formats(
        &self,
        project_id: &str,
        version_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::version_params(project_id, version_id, x_user_id);
        self.client
            .marshaler()
            .build(&GET_VERSION_DOWNLOAD_FORMATS, &params, access_token)
    }

    pub fn build_get_version_downloads(
        &self,
        project_id: &str,
        version_id: &str,
        filter_format_file_type: &[String],
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::version_params(project_id, version_id, x_user_id)
            .query("filter[format.fileType]", filter_format_file_type);
        self.client.marshaler().build(&GET_VERSION_DOWNLOADS, &params, access_token)
    }

    pub fn build_get_version_item(
        &self,
        project_id: &str,
        version_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::version_params(project_id, version_id, x_user_id);
        self.client.marshaler().build(&GET_VERSION_ITEM, &params, access_token)
    }

    pub fn build_get_version_refs(
        &self,
        project_id: &str,
        version_id: &str,
        query: &RefsQuery,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = query
            .params()
            .path("project_id", project_id)
            .path("version_id", version_id);
        self.client.marshaler().build(&GET_VERSION_REFS, &params, access_token)
    }

    pub fn build_get_version_relationships_links(
        &self,
        project_id: &str,
        version_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::version_params(project_id, version_id, x_user_id);
        self.client
            .marshaler()
            .build(&GET_VERSION_RELATIONSHIPS_LINKS, &params, access_token)
    }

    pub fn build_get_version_relationships_refs(
        &self,
        project_id: &str,
        version_id: &str,
        query: &RelationshipRefsQuery,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = query
            .params()
            .path("project_id", project_id)
            .path("version_id", version_id);
        self.client
            .marshaler()
            .build(&GET_VERSION_RELATIONSHIPS_REFS, &params, access_token)
    }

    pub fn build_create_version(
        &self,
        project_id: &str,
        payload: &VersionPayload,
        copy_from: Option<&str>,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .path("project_id", project_id)
            .header("x-user-id", x_user_id)
            .query("copyFrom", copy_from);
        self.client
            .marshaler()
            .build_with_body(&CREATE_VERSION, &params, payload, access_token)
    }

    pub fn build_create_version_relationships_ref(
        &self,
        project_id: &str,
        version_id: &str,
        payload: &RelationshipRefsPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::version_params(project_id, version_id, x_user_id);
        self.client
            .marshaler()
            .build_with_body(&CREATE_VERSION_RELATIONSHIPS_REF, &params, payload, access_token)
    }

    pub fn build_patch_version(
        &self,
        project_id: &str,
        version_id: &str,
        payload: &ModifyPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::version_params(project_id, version_id, x_user_id);
        self.client
            .marshaler()
            .build_with_body(&PATCH_VERSION, &params, payload, access_token)
    }
}

impl<T: Transport> VersionsApi<'_, T> {
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_version(
        &self,
        project_id: &str,
        version_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Version>, ApiError> {
        self.client
            .call(self.build_get_version(project_id, version_id, x_user_id, access_token)?)
            .await
    }

    /// File types a version can be converted to.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_version_download_formats(
        &self,
        project_id: &str,
        version_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<DownloadFormats>, ApiError> {
        self.client
            .call(self.build_get_version_download_formats(project_id, version_id, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_version_downloads(
        &self,
        project_id: &str,
        version_id: &str,
        filter_format_file_type: &[String],
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Downloads>, ApiError> {
        let request =
            self.build_get_version_downloads(project_id, version_id, filter_format_file_type, x_user_id, access_token)?;
        self.client.call(request).await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_version_item(
        &self,
        project_id: &str,
        version_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Item>, ApiError> {
        self.client
            .call(self.build_get_version_item(project_id, version_id, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_version_refs(
        &self,
        project_id: &str,
        version_id: &str,
        query: &RefsQuery,
        access_token: &str,
    ) -> Result<ApiResponse<Refs>, ApiError> {
        self.client
            .call(self.build_get_version_refs(project_id, version_id, query, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_version_relationships_links(
        &self,
        project_id: &str,
        version_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<RelationshipLinks>, ApiError> {
        self.client
            .call(self.build_get_version_relationships_links(project_id, version_id, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_version_relationships_refs(
        &self,
        project_id: &str,
        version_id: &str,
        query: &RelationshipRefsQuery,
        access_token: &str,
    ) -> Result<ApiResponse<RelationshipRefs>, ApiError> {
        self.client
            .call(self.build_get_version_relationships_refs(project_id, version_id, query, access_token)?)
            .await
    }

    /// Add a version to an existing item, from uploaded storage or by
    /// copying `copy_from`.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn create_version(
        &self,
        project_id: &str,
        payload: &VersionPayload,
        copy_from: Option<&str>,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<CreatedVersion>, ApiError> {
        self.client
            .call(self.build_create_version(project_id, payload, copy_from, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub async fn create_version_relationships_ref(
        &self,
        project_id: &str,
        version_id: &str,
        payload: &RelationshipRefsPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpResponse, ApiError> {
        let request =
            self.build_create_version_relationships_ref(project_id, version_id, payload, x_user_id, access_token)?;
        self.client.call_raw(request).await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn patch_version(
        &self,
        project_id: &str,
        version_id: &str,
        payload: &ModifyPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Version>, ApiError> {
        self.client
            .call(self.build_patch_version(project_id, version_id, payload, x_user_id, access_token)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::test_support::{builder, client, CannedTransport};
    use crate::models::{relationship_ref, Document, EntityAttributes, Resource};

    const PROJECT: &str = "b.123";
    const VERSION: &str = "urn:adsk.wipprod:fs.file:vf.abc?version=2";

    #[test]
    fn version_urn_query_mark_is_escaped_in_path() {
        let req = builder().versions().build_get_version(PROJECT, VERSION, None, "tok").unwrap();
        assert_eq!(
            req.url,
            "https://aps.test/data/v1/projects/b.123/versions/urn:adsk.wipprod:fs.file:vf.abc%3Fversion=2"
        );
        assert!(req.query().is_none());
    }

    #[test]
    fn downloads_filter_by_file_type() {
        let types = vec!["dwf".to_string(), "pdf".to_string()];
        let req = builder()
            .versions()
            .build_get_version_downloads(PROJECT, VERSION, &types, None, "tok")
            .unwrap();
        assert_eq!(req.query(), Some("filter[format.fileType]=dwf,pdf"));
    }

    #[test]
    fn patch_version_uses_patch() {
        let payload: ModifyPayload = Document::new(Resource::new("versions", VERSION).with_attributes(EntityAttributes {
            name: Some("renamed.rvt".to_string()),
            ..Default::default()
        }));
        let req = builder()
            .versions()
            .build_patch_version(PROJECT, VERSION, &payload, None, "tok")
            .unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["data"]["id"], VERSION);
        assert_eq!(body["data"]["attributes"], json!({"name": "renamed.rvt"}));
    }

    #[tokio::test]
    async fn download_formats_parse() {
        let body = json!({
            "data": {
                "type": "downloadFormats",
                "id": VERSION,
                "attributes": {"formats": [{"fileType": "dwf"}, {"fileType": "pdf"}]}
            }
        });
        let client = client(CannedTransport::default().respond(200, &body.to_string()));
        let formats = client
            .versions()
            .get_version_download_formats(PROJECT, VERSION, None, "tok")
            .await
            .unwrap();
        let formats = formats.value.data.attributes.unwrap().formats;
        assert_eq!(formats.len(), 2);
        assert_eq!(formats[1].file_type, "pdf");
    }

    #[test]
    fn every_operation_resolves_its_route() {
        let api = builder();
        let versions = api.versions();
        let create: VersionPayload = Document::new(Resource::new("versions", ""));
        let modify: ModifyPayload = Document::new(Resource::new("versions", VERSION));
        let reference = relationship_ref("items", "urn:adsk.wipprod:dm.lineage:abc");
        let base = "/data/v1/projects/b.123/versions/urn:adsk.wipprod:fs.file:vf.abc%3Fversion=2";
        let routes = [
            (versions.build_get_version(PROJECT, VERSION, None, "tok"), base.to_string()),
            (
                versions.build_get_version_download_formats(PROJECT, VERSION, None, "tok"),
                format!("{base}/downloadFormats"),
            ),
            (
                versions.build_get_version_downloads(PROJECT, VERSION, &[], None, "tok"),
                format!("{base}/downloads"),
            ),
            (versions.build_get_version_item(PROJECT, VERSION, None, "tok"), format!("{base}/item")),
            (
                versions.build_get_version_refs(PROJECT, VERSION, &RefsQuery::default(), "tok"),
                format!("{base}/refs"),
            ),
            (
                versions.build_get_version_relationships_links(PROJECT, VERSION, None, "tok"),
                format!("{base}/relationships/links"),
            ),
            (
                versions.build_get_version_relationships_refs(PROJECT, VERSION, &RelationshipRefsQuery::default(), "tok"),
                format!("{base}/relationships/refs"),
            ),
            (
                versions.build_create_version(PROJECT, &create, None, None, "tok"),
                "/data/v1/projects/b.123/versions".to_string(),
            ),
            (
                versions.build_create_version_relationships_ref(PROJECT, VERSION, &reference, None, "tok"),
                format!("{base}/relationships/refs"),
            ),
            (versions.build_patch_version(PROJECT, VERSION, &modify, None, "tok"), base.to_string()),
        ];
        for (req, path) in routes {
            let req = req.unwrap();
            assert_eq!(req.path(), format!("https://aps.test{path}"));
            assert!(!req.url.contains('{'), "{}", req.url);
        }
    }
}
