//! Items: a file in a folder and its chain of versions.

use crate::api::{RefsQuery, RelationshipRefsQuery, DATA_CREATE, DATA_MANAGEMENT, DATA_READ, DATA_WRITE};
use crate::client::ApsClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::marshal::{ApiResponse, Operation, Params, JSON_API};
use crate::models::{
    CreatedItem, Folder, Item, ItemPayload, ItemTip, ModifyPayload, Refs, RelationshipLinks, RelationshipRefs,
    RelationshipRefsPayload, Versions,
};
use crate::transport::Transport;

const GET_ITEM: Operation =
    Operation::new(DATA_MANAGEMENT, "getItem", HttpMethod::Get, "/data/v1/projects/{project_id}/items/{item_id}")
        .scopes(DATA_READ);
const GET_ITEM_PARENT_FOLDER: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getItemParentFolder",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/items/{item_id}/parent",
)
.scopes(DATA_READ);
const GET_ITEM_REFS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getItemRefs",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/items/{item_id}/refs",
)
.scopes(DATA_READ);
const GET_ITEM_RELATIONSHIPS_LINKS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getItemRelationshipsLinks",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/items/{item_id}/relationships/links",
)
.scopes(DATA_READ);
const GET_ITEM_RELATIONSHIPS_REFS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getItemRelationshipsRefs",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/items/{item_id}/relationships/refs",
)
.scopes(DATA_READ);
const GET_ITEM_TIP: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getItemTip",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/items/{item_id}/tip",
)
.scopes(DATA_READ);
const GET_ITEM_VERSIONS: Operation = Operation::new(
    DATA_MANAGEMENT,
    "getItemVersions",
    HttpMethod::Get,
    "/data/v1/projects/{project_id}/items/{item_id}/versions",
)
.scopes(DATA_READ);
const CREATE_ITEM: Operation =
    Operation::new(DATA_MANAGEMENT, "createItem", HttpMethod::Post, "/data/v1/projects/{project_id}/items")
        .scopes(DATA_CREATE)
        .content_type(JSON_API);
const CREATE_ITEM_RELATIONSHIPS_REF: Operation = Operation::new(
    DATA_MANAGEMENT,
    "createItemRelationshipsRef",
    HttpMethod::Post,
    "/data/v1/projects/{project_id}/items/{item_id}/relationships/refs",
)
.scopes(DATA_CREATE)
.content_type(JSON_API);
const PATCH_ITEM: Operation =
    Operation::new(DATA_MANAGEMENT, "patchItem", HttpMethod::Patch, "/data/v1/projects/{project_id}/items/{item_id}")
        .scopes(DATA_WRITE)
        .content_type(JSON_API);

/// Filters and paging for the version history of an item.
#[derive(Debug, Clone, Default)]
pub struct ItemVersionsQuery {
    pub x_user_id: Option<String>,
    pub filter_id: Vec<String>,
    pub filter_extension_type: Vec<String>,
    pub filter_version_number: Vec<String>,
    pub page_number: i32,
    pub page_limit: i32,
}

pub struct ItemsApi<'a, T> {
    client: &'a ApsClient<T>,
}

impl<'a, T> ItemsApi<'a, T> {
    pub(crate) fn new(client: &'a ApsClient<T>) -> Self {
        Self { client }
    }

    fn item_params(project_id: &str, item_id: &str, x_user_id: Option<&str>) -> Params {
        Params::new()
            .path("project_id", project_id)
            .path("item_id", item_id)
            .header("x-user-id", x_user_id)
    }

    pub fn build_get_item(
        &self,
        project_id: &str,
        item_id: &str,
        x_user_id: Option<&str>,
        include_path_in_project: Option<bool>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params =
            Self::item_params(project_id, item_id, x_user_id).query("includePathInProject", include_path_in_project);
        self.client.marshaler().build(&GET_ITEM, &params, access_token)
    }

    pub fn build_get_item_parent_folder(
        &self,
        project_id: &str,
        item_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::item_params(project_id, item_id, x_user_id);
        self.client.marshaler().build(&GET_ITEM_PARENT_FOLDER, &params, access_token)
    }

    pub fn build_get_item_refs(
        &self,
        project_id: &str,
        item_id: &str,
        query: &RefsQuery,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = query.params().path("project_id", project_id).path("item_id", item_id);
        self.client.marshaler().build(&GET_ITEM_REFS, &params, access_token)
    }

    pub fn build_get_item_relationships_links(
        &self,
        project_id: &str,
        item_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::item_params(project_id, item_id, x_user_id);
        self.client
            .marshaler()
            .build(&GET_ITEM_RELATIONSHIPS_LINKS, &params, access_token)
    }

    pub fn build_get_item_relationships_refs(
        &self,
        project_id: &str,
        item_id: &str,
        query: &RelationshipRefsQuery,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = query.params().path("project_id", project_id).path("item_id", item_id);
        self.client
            .marshaler()
            .build(&GET_ITEM_RELATIONSHIPS_REFS, &params, access_token)
    }

    pub fn build_get_item_tip(
        &self,
        project_id: &str,
        item_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::item_params(project_id, item_id, x_user_id);
        self.client.marshaler().build(&GET_ITEM_TIP, &params, access_token)
    }

    pub fn build_get_item_versions(
        &self,
        project_id: &str,
        item_id: &str,
        query: &ItemVersionsQuery,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::item_params(project_id, item_id, query.x_user_id.as_deref())
            .query("filter[id]", query.filter_id.as_slice())
            .query("filter[extension.type]", query.filter_extension_type.as_slice())
            .query("filter[versionNumber]", query.filter_version_number.as_slice())
            .query("page[number]", query.page_number)
            .query("page[limit]", query.page_limit);
        self.client.marshaler().build(&GET_ITEM_VERSIONS, &params, access_token)
    }

    /// `copy_from` names a version to copy instead of uploading a new file.
    pub fn build_create_item(
        &self,
        project_id: &str,
        payload: &ItemPayload,
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
            .build_with_body(&CREATE_ITEM, &params, payload, access_token)
    }

    pub fn build_create_item_relationships_ref(
        &self,
        project_id: &str,
        item_id: &str,
        payload: &RelationshipRefsPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::item_params(project_id, item_id, x_user_id);
        self.client
            .marshaler()
            .build_with_body(&CREATE_ITEM_RELATIONSHIPS_REF, &params, payload, access_token)
    }

    pub fn build_patch_item(
        &self,
        project_id: &str,
        item_id: &str,
        payload: &ModifyPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let params = Self::item_params(project_id, item_id, x_user_id);
        self.client
            .marshaler()
            .build_with_body(&PATCH_ITEM, &params, payload, access_token)
    }
}

impl<T: Transport> ItemsApi<'_, T> {
    /// Fetch an item with its tip version in `included`.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_item(
        &self,
        project_id: &str,
        item_id: &str,
        x_user_id: Option<&str>,
        include_path_in_project: Option<bool>,
        access_token: &str,
    ) -> Result<ApiResponse<Item>, ApiError> {
        self.client
            .call(self.build_get_item(project_id, item_id, x_user_id, include_path_in_project, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_item_parent_folder(
        &self,
        project_id: &str,
        item_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Folder>, ApiError> {
        self.client
            .call(self.build_get_item_parent_folder(project_id, item_id, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_item_refs(
        &self,
        project_id: &str,
        item_id: &str,
        query: &RefsQuery,
        access_token: &str,
    ) -> Result<ApiResponse<Refs>, ApiError> {
        self.client
            .call(self.build_get_item_refs(project_id, item_id, query, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_item_relationships_links(
        &self,
        project_id: &str,
        item_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<RelationshipLinks>, ApiError> {
        self.client
            .call(self.build_get_item_relationships_links(project_id, item_id, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_item_relationships_refs(
        &self,
        project_id: &str,
        item_id: &str,
        query: &RelationshipRefsQuery,
        access_token: &str,
    ) -> Result<ApiResponse<RelationshipRefs>, ApiError> {
        self.client
            .call(self.build_get_item_relationships_refs(project_id, item_id, query, access_token)?)
            .await
    }

    /// Latest version of an item.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_item_tip(
        &self,
        project_id: &str,
        item_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<ItemTip>, ApiError> {
        self.client
            .call(self.build_get_item_tip(project_id, item_id, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_item_versions(
        &self,
        project_id: &str,
        item_id: &str,
        query: &ItemVersionsQuery,
        access_token: &str,
    ) -> Result<ApiResponse<Versions>, ApiError> {
        self.client
            .call(self.build_get_item_versions(project_id, item_id, query, access_token)?)
            .await
    }

    /// Create an item with its first version.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn create_item(
        &self,
        project_id: &str,
        payload: &ItemPayload,
        copy_from: Option<&str>,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<CreatedItem>, ApiError> {
        self.client
            .call(self.build_create_item(project_id, payload, copy_from, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub async fn create_item_relationships_ref(
        &self,
        project_id: &str,
        item_id: &str,
        payload: &RelationshipRefsPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<HttpResponse, ApiError> {
        self.client
            .call_raw(self.build_create_item_relationships_ref(project_id, item_id, payload, x_user_id, access_token)?)
            .await
    }

    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn patch_item(
        &self,
        project_id: &str,
        item_id: &str,
        payload: &ModifyPayload,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Item>, ApiError> {
        self.client
            .call(self.build_patch_item(project_id, item_id, payload, x_user_id, access_token)?)
            .await
    }
}
