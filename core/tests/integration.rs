//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the client over real
//! HTTP twice: once executing built requests with ureq (host-does-IO), once
//! through `ReqwestTransport`. Validates that request building and response
//! interpretation agree with the server's routes and payloads.

use aps_core::api::{FolderContentsQuery, HubsQuery, SystemEventHooksQuery};
use aps_core::models::{
    relationship_ref, FolderContents, HookPayload, HookStatus, Hubs, ModifyHookPayload, RefType, Region,
    RelationshipRefs, TokenPayload, WebhookSystem,
};
use aps_core::{interpret, interpret_raw, ApiError, ApsClient, ClientConfig, HttpMethod, HttpRequest, HttpResponse, Lenient};

const TOKEN: &str = "integration-token";
const ROOT_FOLDER: &str = "urn:adsk.wipprod:fs.folder:co.root";
const EVENT: &str = "dm.version.added";

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// interpret statuses.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let HttpRequest {
        method,
        url,
        headers,
        content_headers,
        body,
    } = req;

    let result = match method {
        HttpMethod::Get | HttpMethod::Delete => {
            let mut builder = if method == HttpMethod::Get {
                agent.get(&url)
            } else {
                agent.delete(&url)
            };
            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
            let mut builder = match method {
                HttpMethod::Post => agent.post(&url),
                HttpMethod::Put => agent.put(&url),
                _ => agent.patch(&url),
            };
            for (name, value) in headers.iter().chain(&content_headers) {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };
    let mut response = result.expect("HTTP transport error");

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| (name.as_str().to_string(), value.to_str().unwrap_or_default().to_string()))
        .collect();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse { status, headers, body }
}

/// Start the mock server on its own thread and return its base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn host_does_io_browse() {
    let base_url = spawn_server();
    let client = ApsClient::new(&ClientConfig::default().with_base_url(&base_url), ());

    // Step 1: hubs, then the projects of the first hub.
    let req = client.hubs().build_get_hubs(&HubsQuery::default(), TOKEN).unwrap();
    let hubs = interpret::<Hubs>(execute(req)).unwrap();
    assert_eq!(hubs.status, 200);
    let hub_id = hubs.value.data[0].id.clone();

    let req = client
        .projects()
        .build_get_hub_projects(&hub_id, &Default::default(), TOKEN)
        .unwrap();
    let projects = interpret::<aps_core::models::Projects>(execute(req)).unwrap();
    let project_id = projects.value.data[0].id.clone();
    let root = projects.value.data[0].related("rootFolder").unwrap().id.clone();
    assert_eq!(root, ROOT_FOLDER);

    // Step 2: a page number of 0 is never sent, so the first page comes back.
    let query = FolderContentsQuery {
        page_number: 0,
        page_limit: 50,
        ..Default::default()
    };
    let req = client
        .folders()
        .build_get_folder_contents(&project_id, &root, &query, TOKEN)
        .unwrap();
    assert_eq!(req.query(), Some("page[limit]=50"));
    let contents = interpret::<FolderContents>(execute(req)).unwrap();
    assert_eq!(contents.value.data.len(), 4);
    assert_eq!(contents.value.included.len(), 3);
    assert!(contents.value.next_page().is_none());

    // Step 3: paging through with a small limit.
    let query = FolderContentsQuery {
        page_limit: 3,
        ..Default::default()
    };
    let req = client
        .folders()
        .build_get_folder_contents(&project_id, &root, &query, TOKEN)
        .unwrap();
    let first = interpret::<FolderContents>(execute(req)).unwrap();
    assert_eq!(first.value.data.len(), 3);
    assert!(first.value.next_page().is_some());

    let query = FolderContentsQuery {
        page_number: 1,
        page_limit: 3,
        ..Default::default()
    };
    let req = client
        .folders()
        .build_get_folder_contents(&project_id, &root, &query, TOKEN)
        .unwrap();
    let second = interpret::<FolderContents>(execute(req)).unwrap();
    assert_eq!(second.value.data.len(), 1);

    // Step 4: add a reference, then read it back.
    let payload = relationship_ref("versions", "urn:adsk.wipprod:fs.file:vf.item-1?version=1");
    let req = client
        .folders()
        .build_create_folder_relationships_ref(&project_id, &root, &payload, None, TOKEN)
        .unwrap();
    let created = interpret_raw(execute(req)).unwrap();
    assert_eq!(created.status, 204);

    let req = client
        .folders()
        .build_get_folder_relationships_refs(&project_id, &root, &Default::default(), TOKEN)
        .unwrap();
    let refs = interpret::<RelationshipRefs>(execute(req)).unwrap();
    let meta = aps_core::models::ref_meta(&refs.value.data[0]).unwrap();
    assert_eq!(meta.ref_type, RefType::Auxiliary);
    assert_eq!(meta.from_id.as_deref(), Some(ROOT_FOLDER));

    // Step 5: failures carry the server's JSON:API detail.
    let req = client
        .folders()
        .build_get_folder_contents(&project_id, "urn:missing", &FolderContentsQuery::default(), TOKEN)
        .unwrap();
    let err = interpret::<FolderContents>(execute(req)).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "HTTP 404: Folder urn:missing does not exist");

    let req = client
        .folders()
        .build_get_folder_contents(&project_id, "urn:missing", &FolderContentsQuery::default(), TOKEN)
        .unwrap();
    let soft = interpret::<FolderContents>(execute(req)).lenient().unwrap();
    assert_eq!(soft.status, 404);
    assert!(soft.value.data.is_empty());

    // Step 6: no token, no access.
    let req = client.hubs().build_get_hubs(&HubsQuery::default(), "").unwrap();
    assert!(req.header("Authorization").is_none());
    let err = interpret::<Hubs>(execute(req)).unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn reqwest_transport_webhooks() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));

    let config = ClientConfig {
        region: Some(Region::Emea),
        ..ClientConfig::default().with_base_url(&format!("http://{addr}"))
    };
    let client = ApsClient::from_config(&config).unwrap();
    let hooks = client.hooks();

    // Step 1: create a hook; the answer is a bare 201 with Location.
    let payload = HookPayload::new("https://cb.example.com/aps", "folder", ROOT_FOLDER);
    let created = hooks
        .create_system_event_hook(WebhookSystem::Data, EVENT, &payload, None, TOKEN)
        .await
        .unwrap();
    assert_eq!(created.status, 201);
    let location = created.header("location").unwrap().to_string();
    let hook_id = location.rsplit('/').next().unwrap().to_string();

    // Step 2: list and fetch it in the configured region only.
    let query = SystemEventHooksQuery {
        scope_name: Some("folder".to_string()),
        ..Default::default()
    };
    let listed = hooks
        .get_system_event_hooks(WebhookSystem::Data, EVENT, &query, TOKEN)
        .await
        .unwrap();
    assert_eq!(listed.value.data.len(), 1);
    assert!(listed.value.next_page_state().is_none());

    let us = aps_core::api::HooksQuery {
        region: Some(Region::Us),
        ..Default::default()
    };
    assert!(hooks.get_hooks(&us, TOKEN).await.unwrap().value.data.is_empty());

    let hook = hooks
        .get_hook_details(WebhookSystem::Data, EVENT, &hook_id, None, TOKEN)
        .await
        .unwrap()
        .into_value();
    assert_eq!(hook.status, Some(HookStatus::Active));
    assert_eq!(hook.callback_url, "https://cb.example.com/aps");

    // Step 3: deactivate, then delete.
    let change = ModifyHookPayload {
        status: Some(HookStatus::Inactive),
        ..Default::default()
    };
    hooks
        .patch_system_event_hook(WebhookSystem::Data, EVENT, &hook_id, &change, None, TOKEN)
        .await
        .unwrap();
    let hook = hooks
        .get_hook_details(WebhookSystem::Data, EVENT, &hook_id, None, TOKEN)
        .await
        .unwrap();
    assert_eq!(hook.value.status, Some(HookStatus::Inactive));

    let deleted = hooks
        .delete_system_event_hook(WebhookSystem::Data, EVENT, &hook_id, None, TOKEN)
        .await
        .unwrap();
    assert_eq!(deleted.status, 204);

    // Step 4: a second delete is a 404, recoverable in lenient mode.
    let err = hooks
        .delete_system_event_hook(WebhookSystem::Data, EVENT, &hook_id, None, TOKEN)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    let soft = hooks
        .delete_system_event_hook(WebhookSystem::Data, EVENT, &hook_id, None, TOKEN)
        .await
        .lenient()
        .unwrap();
    assert_eq!(soft.status, 404);

    // Step 5: secret token lifecycle.
    let tokens = client.tokens();
    let secret = TokenPayload {
        token: "first-secret".to_string(),
    };
    let token = tokens.create_token(&secret, None, TOKEN).await.unwrap();
    assert_eq!(token.value.status, 200);
    let rotated = TokenPayload {
        token: "second-secret".to_string(),
    };
    assert_eq!(tokens.put_token(&rotated, None, TOKEN).await.unwrap().status, 204);
    assert_eq!(tokens.delete_token(None, TOKEN).await.unwrap().status, 204);
    assert!(tokens.delete_token(None, TOKEN).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::default().with_base_url(&format!("http://{addr}"));
    let client = ApsClient::from_config(&config).unwrap();
    let err = client.hubs().get_hubs(&HubsQuery::default(), TOKEN).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
