//! Hubs: the BIM 360, ACC, Fusion and personal accounts a token can reach.

use crate::api::{DATA_MANAGEMENT, DATA_READ};
use crate::client::ApsClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::marshal::{ApiResponse, Operation, Params};
use crate::models::{Hub, Hubs};
use crate::transport::Transport;

const GET_HUBS: Operation = Operation::new(DATA_MANAGEMENT, "getHubs", HttpMethod::Get, "/project/v1/hubs").scopes(DATA_READ);
const GET_HUB: Operation =
    Operation::new(DATA_MANAGEMENT, "getHub", HttpMethod::Get, "/project/v1/hubs/{hub_id}").scopes(DATA_READ);

/// Filters for listing hubs.
#[derive(Debug, Clone, Default)]
pub struct HubsQuery {
    /// Act on behalf of this user (two-legged tokens only).
    pub x_user_id: Option<String>,
    pub filter_id: Vec<String>,
    pub filter_name: Vec<String>,
    pub filter_extension_type: Vec<String>,
}

pub struct HubsApi<'a, T> {
    client: &'a ApsClient<T>,
}

impl<'a, T> HubsApi<'a, T> {
    pub(crate) fn new(client: &'a ApsClient<T>) -> Self {
        Self { client }
    }

    pub fn build_get_hubs(&self, query: &HubsQuery, access_token: &str) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .header("x-user-id", query.x_user_id.as_deref())
            .query("filter[id]", query.filter_id.as_slice())
            .query("filter[name]", query.filter_name.as_slice())
            .query("filter[extension.type]", query.filter_extension_type.as_slice());
        self.client.marshaler().build(&GET_HUBS, &params, access_token)
    }

    pub fn build_get_hub(&self, hub_id: &str, x_user_id: Option<&str>, access_token: &str) -> Result<HttpRequest, ApiError> {
        let params = Params::new().path("hub_id", hub_id).header("x-user-id", x_user_id);
        self.client.marshaler().build(&GET_HUB, &params, access_token)
    }
}

impl<T: Transport> HubsApi<'_, T> {
    /// List the hubs the token can access.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_hubs(&self, query: &HubsQuery, access_token: &str) -> Result<ApiResponse<Hubs>, ApiError> {
        self.client.call(self.build_get_hubs(query, access_token)?).await
    }

    /// Fetch one hub.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or undecodable body.
    pub async fn get_hub(
        &self,
        hub_id: &str,
        x_user_id: Option<&str>,
        access_token: &str,
    ) -> Result<ApiResponse<Hub>, ApiError> {
        self.client.call(self.build_get_hub(hub_id, x_user_id, access_token)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{builder, client, CannedTransport};

    #[test]
    fn get_hubs_without_filters_has_no_query() {
        let req = builder().hubs().build_get_hubs(&HubsQuery::default(), "tok").unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://aps.test/project/v1/hubs");
        assert!(req.header("x-user-id").is_none());
    }

    #[test]
    fn get_hubs_joins_list_filters() {
        let query = HubsQuery {
            x_user_id: Some("USER1".to_string()),
            filter_id: vec!["b.1".to_string(), "b.2".to_string()],
            filter_extension_type: vec!["hubs:autodesk.bim360:Account".to_string()],
            ..Default::default()
        };
        let req = builder().hubs().build_get_hubs(&query, "tok").unwrap();
        assert_eq!(
            req.query(),
            Some("filter[id]=b.1,b.2&filter[extension.type]=hubs:autodesk.bim360:Account")
        );
        assert_eq!(req.header("x-user-id"), Some("USER1"));
    }

    #[test]
    fn get_hub_resolves_path() {
        let req = builder().hubs().build_get_hub("b.1234", None, "").unwrap();
        assert_eq!(req.url, "https://aps.test/project/v1/hubs/b.1234");
        assert!(req.header("Authorization").is_none());
    }

    #[tokio::test]
    async fn get_hubs_parses_list() {
        let body = r#"{"jsonapi":{"version":"1.0"},"data":[{"type":"hubs","id":"b.1","attributes":{"name":"Acme","region":"US","extension":{"type":"hubs:autodesk.bim360:Account","version":"1.0"}}}]}"#;
        let client = client(CannedTransport::default().respond(200, body));
        let hubs = client.hubs().get_hubs(&HubsQuery::default(), "tok").await.unwrap();
        let attributes = hubs.value.data[0].attributes.as_ref().unwrap();
        assert_eq!(attributes.name, "Acme");
        assert_eq!(attributes.region.as_deref(), Some("US"));
        assert_eq!(client.transport().last_request().header("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn every_operation_resolves_its_route() {
        let api = builder();
        let routes = [
            (api.hubs().build_get_hubs(&HubsQuery::default(), "tok"), "/project/v1/hubs"),
            (api.hubs().build_get_hub("b.1", None, "tok"), "/project/v1/hubs/b.1"),
        ];
        for (req, path) in routes {
            let req = req.unwrap();
            assert_eq!(req.path(), format!("https://aps.test{path}"));
            assert!(!req.url.contains('{'), "{}", req.url);
        }
    }
}
