//! Folders: contents, references, search and folder creation.

use chrono::{DateTime, Utc};

use crate::api::{DATA_CREATE, DATA_MANAGEMENT, DATA_READ, DATA_SEARCH, DATA_WRITE};
use crate::client::ApsClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::marshal::{ApiResponse, Operation, Params, JSON_API};
use crate::models::{
    FilterType, Folder, FolderContents, FolderPayload, ModifyPayload, RefDirection, RefType, Refs, RelationshipLinks,
    RelationshipRefs, RelationshipRefsPayload, Search,
};
use crate::params::ParamValue;
use crate::transport::Transport;

const GET_FOLDER: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getFolder",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/folders/{folder_id}",
)
.scopes(DATA_READ);
const GET_FOLDER_CONTENTS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getFolderContents",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/folders/{folder_id}/contents",
)
.scopes(DATA_READ);
const GET_FOLDER_PARENT: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getFolderParent",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/folders/{folder_id}/parent",
)
.scopes(DATA_READ);
const GET_FOLDER_REFS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getFolderRefs",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/folders/{folder_id}/refs",
)
.scopes(DATA_READ);
const GET_FOLDER_RELATIONSHIPS_LINKS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getFolderRelationshipsLinks",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/folders/{folder_id}/relationships/links",
)
.scopes(DATA_READ);
const GET_FOLDER_RELATIONSHIPS_REFS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getFolderRelationshipsRefs",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/folders/{folder_id}/relationships/refs",
)
.scopes(DATA_READ);
const GET_FOLDER_SEARCH: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getFolderSearch",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/folders/{folder_id}/search",
)
.scopes(DATA_SEARCH);
const CREATE_FOLDER: Operation =
    Operation::new(DATA_MANAGEMENT, "createFolder", HttpMethod::Post, "/data/v1/projects/{project_id}/folders")
        .scopes(DATA_CREATE)
        .content_type(JSON_API);
const CREATE_FOLDER_RELATIONSHIPS_REF: Operation = Operation::new(
    DATA_MANAGEMENT,
    "createFolderRelationshipsRef",
    HttpMethod::Post,
    "/data/v1/projects/{project_id}/folders/{folder_id}/relationships/refs",
)
.scopes(DATA_CREATE)
.content_type(JSON_API);
const PATCH_FOLDER: Operation = Operation::new(
    DATA_MANAGEMENT,
    "patchFolder",
    HttpMethod::Patch,
    "/data/v1/projects/{project_id}/folders/{folder_id}",
)
.scopes(DATA_WRITE)
.content_type(JSON_API);

/// Filters and paging for the contents of a folder.
#[derive(Debug, Clone, Default)]
pub struct FolderContentsQuery {
    pub x_user_id: Option<String>,
    pub filter_type: Vec<FilterType>,
    pub filter_id: Vec<String>,
    pub filter_extension_type: Vec<String>,
    /// e.g. `2023-01-01T00:00:00Z..` for everything modified since then.
    pub filter_last_modified_time_rollup: Vec<String>,
    pub page_number: i32,
    pub page_limit: i32,
    pub include_hidden: Option<bool>,
}

/// Filters for the resources a folder, item or version refers to.
#[derive(Debug, Clone, Default)]
pub struct RefsQuery {
    pub x_user_id: Option<String>,
    pub filter_type: Vec<FilterType>,
    pub filter_id: Vec<String>,
    pub filter_extension_type: Vec<String>,
}

/// Filters shared by every `relationships/refs` listing.
#[derive(Debug, Clone, Default)]
pub struct RelationshipRefsQuery {
    pub x_user_id: Option<String>,
    pub filter_type: Vec<FilterType>,
    pub filter_id: Vec<String>,
    pub filter_ref_type: Vec<RefType>,
    pub filter_direction: Option<RefDirection>,
    pub filter_extension_type: Vec<String>,
}

impl RefsQuery {
    pub(crate) fn params(&self) -> Params {
        Params::new()
            .header("x-user-id", self.x_user_id.as_deref())
            .query("filter[type]", self.filter_type.as_slice())
            .query("filter[id]", self.filter_id.as_slice())
            .query("filter[extension.type]", self.filter_extension_type.as_slice())
    }
}

impl RelationshipRefsQuery {
    pub(crate) fn params(&self) -> Params {
        Params::new()
            .header("x-user-id", self.x_user_id.as_deref())
            .query("filter[type]", self.filter_type.as_slice())
            .query("filter[id]", self.filter_id.as_slice())
            .query("filter[refType]", self.filter_ref_type.as_slice())
            .query("filter[direction]", self.filter_direction)
            .query("filter[extension.type]", self.filter_extension_type.as_slice())
    }
}

/// Free-form search below a folder.
#[derive(Debug, Clone, Default)]
pub struct FolderSearchQuery {
    /// Search expressions such as `fileType-eq-rvt`, each sent as its own
    /// `filter` parameter.
    pub filter: Vec<String>,
    pub page_number: i32,
}

pub struct FoldersApi<'a, T> {
    client: &'a ApsClient<T>,
}

impl<'a, T> FoldersApi<'a, T> {
    pub(crate) fn new(client: &'a ApsClient<T>) -> Self {
        Self { client }
    }

    fn folder_params(project_id: &str, folder_id: &str, x_user_id: Option<&str>) -> Params {
        Params::new()
            .path("project_id", project_id)
            .path("folder_id", folder_id)
            .header("x-user-id", x_user_id)
    }

    pub fn build_get_folder(
        &self,
        project_id: &str,
        folder_id: &str,
        if_modified_since: Option<DateTime<Utc>>,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params =
            Self::folder_params(project_id, folder_id, x_user_id).header("If-Modified-Since", if_modified_since);
        self.client.marshaler().build(&GET_FOLDER, &params, access_token)
    }

    pub fn build_get_folder_contents(
        &self,
        project_id: &str,
        folder_id: &str,
        query: &FolderContentsQuery,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::folder_params(project_id, folder_id, query.x_user_id.as_deref())
            .query("filter[type]", query.filter_type.as_slice())
            .query("filter[id]", query.filter_id.as_slice())
            .query("filter[extension.type]", query.filter_extension_type.as_slice())
            .query("filter[lastModifiedTimeRollup]", query.filter_last_modified_time_rollup.as_slice())
            .query("page[number]", query.page_number)
            .query("page[limit]", query.page_limit)
            .query("includeHidden", query.include_hidden);
        self.client.marshaler().build(&GET_FOLDER_CONTENTS, &params, access_token)
    }

    pub fn build_get_folder_parent(
        &self,
        project_id: &str,
        folder_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::folder_params(project_id, folder_id, x_user_id);
        self.client.marshaler().build(&GET_FOLDER_PARENT, &params, access_token)
    }

    pub fn build_get_folder_refs(
        &self,
        project_id: &str,
        folder_id: &str,
        query: &RefsQuery,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = query
            .params()
            .path("project_id", project_id)
            .path("folder_id", folder_id);
        self.client.marshaler().build(&GET_FOLDER_REFS, &params, access_token)
    }

    pub fn build_get_folder_relationships_links(
        &self,
        project_id: &str,
        folder_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::folder_params(project_id, folder_id, x_user_id);
        self.client
            .marshaler()
            .build(&GET_FOLDER_RELATIONSHIPS_LINKS, &params, access_token)
    }

    pub fn build_get_folder_relationships_refs(
        &self,
        project_id: &str,
        folder_id: &str,
        query: &RelationshipRefsQuery,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = query
            .params()
            .path("project_id", project_id)
            .path("folder_id", folder_id);
        self.client
            .marshaler()
            .build(&GET_FOLDER_RELATIONSHIPS_REFS, &params, access_token)
    }

    pub fn build_get_folder_search(
        &self,
        project_id: &str,
        folder_id: &str,
        query: &FolderSearchQuery,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::folder_params(project_id, folder_id, x_user_id)
            .query("filter", ParamValue::from(query.filter.as_slice()).repeated())
            .query("page[number]", query.page_number);
        self.client.marshaler().build(&GET_FOLDER_SEARCH, &params, access_token)
    }

    pub fn build_create_folder(
        &self,
        project_id: &str,
        payload: &FolderPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new().path("project_id", project_id).header("x-user-id", x_user_id);
        self.client
            .marshaler()
            .build_with_body(&CREATE_FOLDER, &params, payload, access_token)
    }

    pub fn build_create_folder_relationships_ref(
        &self,
        project_id: &str,
        folder_id: &str,
        payload: &RelationshipRefsPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::folder_params(project_id, folder_id, x_user_id);
        self.client
            .marshaler()
            .build_with_body(&CREATE_FOLDER_RELATIONSHIPS_REF, &params, payload, access_token)
    }

    pub fn build_patch_folder(
        &self,
        project_id: &str,
        folder_id: &str,
        payload: &ModifyPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::folder_params(project_id, folder_id, x_user_id);
        self.client
            .marshaler()
            .build_with_body(&PATCH_FOLDER, &params, payload, access_token)
    }
}

impl<T: Transport> FoldersApi<'_, T> {
    /// Fetch a folder. With `if_modified_since` set the service may answer
    /// 304, which surfaces as `ApiError::Status`.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_folder(
        &self,
        project_id: &str,
        folder_id: &str,
        if_modified_since: Option<DateTime<Utc>>,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Folder>, ApiError> {
        self.client
            .call(self.build_get_folder(project_id, folder_id, if_modified_since, x_user_id, access_token)?)
            .await
    }

    /// One page of the folders and items inside a folder. Tip versions of
    /// the items come back in `included`.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_folder_contents(
        &self,
        project_id: &str,
        folder_id: &str,
        query: &FolderContentsQuery,
        access_token: &str,
    ) -> Result<ApiResponse<FolderContents>, ApiError> {
        self.client
            .call(self.build_get_folder_contents(project_id, folder_id, query, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_folder_parent(
        &self,
        project_id: &str,
        folder_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Folder>, ApiError> {
        self.client
            .call(self.build_get_folder_parent(project_id, folder_id, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_folder_refs(
        &self,
        project_id: &str,
        folder_id: &str,
        query: &RefsQuery,
        access_token: &str,
    ) -> Result<ApiResponse<Refs>, ApiError> {
        self.client
            .call(self.build_get_folder_refs(project_id, folder_id, query, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_folder_relationships_links(
        &self,
        project_id: &str,
        folder_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<RelationshipLinks>, ApiError> {
        self.client
            .call(self.build_get_folder_relationships_links(project_id, folder_id, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_folder_relationships_refs(
        &self,
        project_id: &str,
        folder_id: &str,
        query: &RelationshipRefsQuery,
        access_token: &str,
    ) -> Result<ApiResponse<RelationshipRefs>, ApiError> {
        self.client
            .call(self.build_get_folder_relationships_refs(project_id, folder_id, query, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_folder_search(
        &self,
        project_id: &str,
        folder_id: &str,
        query: &FolderSearchQuery,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Search>, ApiError> {
        self.client
            .call(self.build_get_folder_search(project_id, folder_id, query, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn create_folder(
        &self,
        project_id: &str,
        payload: &FolderPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Folder>, ApiError> {
        self.client
            .call(self.build_create_folder(project_id, payload, x_user_id, access_token)?)
            .await
    }

    /// Add a custom relationship. The service answers 204 with no body, so
    /// the response itself is returned.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub async fn create_folder_relationships_ref(
        &self,
        project_id: &str,
        folder_id: &str,
        payload: &RelationshipRefsPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .call_raw(self.build_create_folder_relationships_ref(project_id, folder_id, payload, x_user_id, access_token)?)
            .await
    }

    /// Rename or hide a folder.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn patch_folder(
        &self,
        project_id: &str,
        folder_id: &str,
        payload: &ModifyPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Folder>, ApiError> {
        self.client
            .call(self.build_patch_folder(project_id, folder_id, payload, x_user_id, access_token)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::client::test_support::{builder, client, CannedTransport};
    use crate::marshal::Lenient;
    use crate::models::{relationship_ref, Document, EntityAttributes, Extension, Resource, ResourceIdentifier};

    const PROJECT: &str = "b.123";
    const FOLDER: &str = "urn:adsk.wipprod:fs.folder:co.abc";

    #[test]
    fn contents_with_type_filter_and_paging() {
        let query = FolderContentsQuery {
            filter_type: vec![FilterType::Folders, FilterType::Items],
            page_number: 1,
            page_limit: 200,
            include_hidden: Some(true),
            ..Default::default()
        };
        let req = builder()
            .folders()
            .build_get_folder_contents(PROJECT, FOLDER, &query, "tok")
            .unwrap();
        assert_eq!(
            req.url,
            "https://aps.test/data/v1/projects/b.123/folders/urn:adsk.wipprod:fs.folder:co.abc/contents\
             ?filter[type]=folders,items&page[number]=1&page[limit]=200&includeHidden=true"
        );
    }

    #[test]
    fn if_modified_since_uses_http_date() {
        let since = Utc.with_ymd_and_hms(2024, 3, 5, 8, 9, 10).unwrap();
        let req = builder()
            .folders()
            .build_get_folder(PROJECT, FOLDER, Some(since), None, "tok")
            .unwrap();
        assert_eq!(req.header("If-Modified-Since"), Some("Tue, 05 Mar 2024 08:09:10 GMT"));

        let req = builder().folders().build_get_folder(PROJECT, FOLDER, None, None, "tok").unwrap();
        assert!(req.header("If-Modified-Since").is_none());
    }

    #[test]
    fn relationship_refs_filters() {
        let query = RelationshipRefsQuery {
            filter_ref_type: vec![RefType::Xrefs, RefType::Auxiliary],
            filter_direction: Some(RefDirection::From),
            ..Default::default()
        };
        let req = builder()
            .folders()
            .build_get_folder_relationships_refs(PROJECT, FOLDER, &query, "tok")
            .unwrap();
        assert_eq!(req.query(), Some("filter[refType]=xrefs,auxiliary&filter[direction]=from"));
    }

    #[test]
    fn search_repeats_each_filter() {
        let query = FolderSearchQuery {
            filter: vec!["fileType-eq-rvt".to_string(), "displayName-contains-Level".to_string()],
            page_number: 0,
        };
        let req = builder()
            .folders()
            .build_get_folder_search(PROJECT, FOLDER, &query, None, "tok")
            .unwrap();
        assert_eq!(
            req.query(),
            Some("filter=fileType-eq-rvt&filter=displayName-contains-Level")
        );
    }

    #[test]
    fn create_folder_body() {
        let payload: FolderPayload = Document::new(
            Resource::new("folders", "")
                .with_attributes(EntityAttributes {
                    name: Some("Drawings".to_string()),
                    extension: Some(Extension::new("folders:autodesk.core:Folder", "1.0")),
                    ..Default::default()
                })
                .with_relationship("parent", ResourceIdentifier::new("folders", FOLDER)),
        );
        let req = builder().folders().build_create_folder(PROJECT, &payload, None, "tok").unwrap();
        assert_eq!(req.url, "https://aps.test/data/v1/projects/b.123/folders");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["data"]["attributes"]["name"], "Drawings");
        assert_eq!(body["data"]["attributes"]["extension"]["type"], "folders:autodesk.core:Folder");
        assert_eq!(body["data"]["relationships"]["parent"]["data"]["id"], FOLDER);
    }

    #[tokio::test]
    async fn relationship_ref_returns_raw_no_content() {
        let client = client(CannedTransport::default().respond(204, ""));
        let payload = relationship_ref("versions", "urn:v?version=1");
        let response = client
            .folders()
            .create_folder_relationships_ref(PROJECT, FOLDER, &payload, None, "tok")
            .await
            .unwrap();
        assert_eq!(response.status, 204);
        let sent = client.transport().last_request();
        assert_eq!(sent.method, HttpMethod::Post);
        assert!(sent.url.ends_with("/relationships/refs"));
    }

    #[tokio::test]
    async fn not_modified_is_an_error_unless_lenient() {
        let client = client(CannedTransport::default().respond(304, ""));
        let folder = client
            .folders()
            .get_folder(PROJECT, FOLDER, Some(Utc::now()), None, "tok")
            .await
            .lenient()
            .unwrap();
        assert_eq!(folder.status, 304);
        assert!(folder.value.data.attributes.is_none());
    }

    #[test]
    fn every_operation_resolves_its_route() {
        let api = builder();
        let folders = api.folders();
        let create: FolderPayload = Document::new(Resource::new("folders", ""));
        let modify: ModifyPayload = Document::new(Resource::new("folders", FOLDER));
        let reference = relationship_ref("versions", "urn:v?version=1");
        let base = "/data/v1/projects/b.123/folders/urn:adsk.wipprod:fs.folder:co.abc";
        let routes = [
            (folders.build_get_folder(PROJECT, FOLDER, None, None, "tok"), base.to_string()),
            (
                folders.build_get_folder_contents(PROJECT, FOLDER, &FolderContentsQuery::default(), "tok"),
                format!("{base}/contents"),
            ),
            (folders.build_get_folder_parent(PROJECT, FOLDER, None, "tok"), format!("{base}/parent")),
            (
                folders.build_get_folder_refs(PROJECT, FOLDER, &RefsQuery::default(), "tok"),
                format!("{base}/refs"),
            ),
            (
                folders.build_get_folder_relationships_links(PROJECT, FOLDER, None, "tok"),
                format!("{base}/relationships/links"),
            ),
            (
                folders.build_get_folder_relationships_refs(PROJECT, FOLDER, &RelationshipRefsQuery::default(), "tok"),
                format!("{base}/relationships/refs"),
            ),
            (
                folders.build_get_folder_search(PROJECT, FOLDER, &FolderSearchQuery::default(), None, "tok"),
                format!("{base}/search"),
            ),
            (
                folders.build_create_folder(PROJECT, &create, None, "tok"),
                "/data/v1/projects/b.123/folders".to_string(),
            ),
            (
                folders.build_create_folder_relationships_ref(PROJECT, FOLDER, &reference, None, "tok"),
                format!("{base}/relationships/refs"),
            ),
            (folders.build_patch_folder(PROJECT, FOLDER, &modify, None, "tok"), base.to_string()),
        ];
        for (req, path) in routes {
            let req = req.unwrap();
            assert_eq!(req.path(), format!("https://aps.test{path}"));
            assert!(!req.url.contains('{'), "{}", req.url);
        }
    }
}
