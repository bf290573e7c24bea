//! In-memory emulation of the Data Management and Webhooks endpoints the
//! client exercises in its integration tests.
//!
//! Seeded with one hub, one project and a root folder. Every route requires
//! a bearer token; errors use the JSON:API `errors` envelope.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const HUB_ID: &str = "b.mock-hub";
pub const PROJECT_ID: &str = "b.mock-project";
pub const ROOT_FOLDER: &str = "urn:adsk.wipprod:fs.folder:co.root";

const DEFAULT_PAGE_LIMIT: usize = 200;
const DEFAULT_REGION: &str = "US";

/// A webhook as stored and returned by the emulator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    pub hook_id: Uuid,
    pub tenant: String,
    pub callback_url: String,
    pub created_by: String,
    pub event: String,
    pub system: String,
    pub creator_type: String,
    pub status: String,
    pub scope: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_reactivate_hook: Option<bool>,
    pub urn: String,
    #[serde(rename = "__self__")]
    pub self_path: String,
    #[serde(skip)]
    pub region: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHook {
    pub callback_url: String,
    pub scope: BTreeMap<String, String>,
    pub filter: Option<String>,
    pub auto_reactivate_hook: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyHook {
    pub status: Option<String>,
    pub filter: Option<String>,
    pub auto_reactivate_hook: Option<bool>,
}

#[derive(Deserialize)]
pub struct TokenInput {
    pub token: String,
}

#[derive(Default)]
pub struct Store {
    pub hubs: Vec<Value>,
    pub projects: HashMap<String, Vec<Value>>,
    pub folder_contents: HashMap<String, Vec<Value>>,
    pub included: Vec<Value>,
    pub refs: HashMap<String, Vec<Value>>,
    pub hooks: Vec<Hook>,
    pub tokens: HashMap<String, String>,
}

impl Store {
    /// One hub, one project, and a root folder holding a subfolder and
    /// three files with one version each.
    pub fn seeded() -> Self {
        let mut store = Store {
            hubs: vec![json!({
                "type": "hubs",
                "id": HUB_ID,
                "attributes": {
                    "name": "Mock Hub",
                    "region": "US",
                    "extension": {"type": "hubs:autodesk.bim360:Account", "version": "1.0"}
                }
            })],
            ..Default::default()
        };
        store.projects.insert(
            HUB_ID.to_string(),
            vec![json!({
                "type": "projects",
                "id": PROJECT_ID,
                "attributes": {
                    "name": "Mock Project",
                    "scopes": ["b360project.mock", "global"],
                    "extension": {"type": "projects:autodesk.bim360:Project", "version": "1.0"}
                },
                "relationships": {
                    "hub": {"data": {"type": "hubs", "id": HUB_ID}},
                    "rootFolder": {"data": {"type": "folders", "id": ROOT_FOLDER}}
                }
            })],
        );

        let mut contents = vec![json!({
            "type": "folders",
            "id": "urn:adsk.wipprod:fs.folder:co.plans",
            "attributes": {"name": "Plans", "displayName": "Plans", "objectCount": 0, "hidden": false}
        })];
        for n in 1..=3 {
            let item = format!("urn:adsk.wipprod:dm.lineage:item-{n}");
            let version = format!("urn:adsk.wipprod:fs.file:vf.item-{n}?version=1");
            contents.push(json!({
                "type": "items",
                "id": item,
                "attributes": {"displayName": format!("model-{n}.rvt"), "hidden": false},
                "relationships": {"tip": {"data": {"type": "versions", "id": version}}}
            }));
            store.included.push(json!({
                "type": "versions",
                "id": version,
                "attributes": {
                    "name": format!("model-{n}.rvt"),
                    "versionNumber": 1,
                    "fileType": "rvt",
                    "storageSize": 1024 * n
                }
            }));
        }
        store.folder_contents.insert(ROOT_FOLDER.to_string(), contents);
        store
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/project/v1/hubs", get(list_hubs))
        .route("/project/v1/hubs/{hub_id}", get(get_hub))
        .route("/project/v1/hubs/{hub_id}/projects", get(list_projects))
        .route(
            "/data/v1/projects/{project_id}/folders/{folder_id}/contents",
            get(folder_contents),
        )
        .route(
            "/data/v1/projects/{project_id}/folders/{folder_id}/relationships/refs",
            get(list_refs).post(create_ref),
        )
        .route("/webhooks/v1/hooks", get(list_hooks))
        .route(
            "/webhooks/v1/systems/{system}/events/{event}/hooks",
            get(list_event_hooks).post(create_hook),
        )
        .route(
            "/webhooks/v1/systems/{system}/events/{event}/hooks/{hook_id}",
            get(get_hook).patch(patch_hook).delete(delete_hook),
        )
        .route("/webhooks/v1/tokens", post(create_token))
        .route("/webhooks/v1/tokens/@me", put(replace_token).delete(delete_token))
        .layer(middleware::from_fn(require_bearer))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock APS server listening");
    }
    axum::serve(listener, app()).await
}

/// JSON:API error document.
pub fn error_response(status: StatusCode, title: &str, detail: &str) -> Response {
    let body = json!({
        "jsonapi": {"version": "1.0"},
        "errors": [{
            "id": Uuid::new_v4(),
            "status": status.as_u16().to_string(),
            "code": title.to_ascii_uppercase().replace(' ', "_"),
            "title": title,
            "detail": detail
        }]
    });
    (status, Json(body)).into_response()
}

fn not_found(detail: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, "Not Found", detail)
}

async fn require_bearer(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if !authorized {
        tracing::debug!(path = %request.uri().path(), "rejected request without bearer token");
        return error_response(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "The Authorization header is missing or not a bearer token",
        );
    }
    next.run(request).await
}

fn region(headers: &HeaderMap) -> String {
    headers
        .get("x-ads-region")
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_REGION)
        .to_string()
}

fn list_filter(query: &HashMap<String, String>, key: &str) -> Option<Vec<String>> {
    query
        .get(key)
        .map(|value| value.split(',').map(str::to_string).collect())
}

fn matches_filter(resource: &Value, field: &str, filter: &Option<Vec<String>>) -> bool {
    match filter {
        None => true,
        Some(wanted) => resource[field]
            .as_str()
            .is_some_and(|value| wanted.iter().any(|w| w == value)),
    }
}

/// Slice `entries` per `page[number]` and `page[limit]`, with a `next` link
/// when more remain.
fn paginate(path: &str, entries: Vec<Value>, query: &HashMap<String, String>) -> (Vec<Value>, Value) {
    let number: usize = query.get("page[number]").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: usize = query
        .get("page[limit]")
        .and_then(|v| v.parse().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_PAGE_LIMIT);

    let total = entries.len();
    let page: Vec<Value> = entries
        .into_iter()
        .skip(number.saturating_mul(limit))
        .take(limit)
        .collect();
    let mut links = json!({"self": {"href": path}});
    let end = number.checked_add(1).and_then(|next| next.checked_mul(limit));
    if end.is_some_and(|end| end < total) {
        links["next"] = json!({"href": format!("{path}?page[number]={}&page[limit]={limit}", number + 1)});
    }
    (page, links)
}

async fn list_hubs(State(db): State<Db>, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let store = db.read().await;
    let ids = list_filter(&query, "filter[id]");
    let hubs: Vec<Value> = store
        .hubs
        .iter()
        .filter(|hub| matches_filter(hub, "id", &ids))
        .cloned()
        .collect();
    Json(json!({"jsonapi": {"version": "1.0"}, "data": hubs}))
}

async fn get_hub(State(db): State<Db>, Path(hub_id): Path<String>) -> Response {
    let store = db.read().await;
    match store.hubs.iter().find(|hub| hub["id"] == hub_id.as_str()) {
        Some(hub) => Json(json!({"jsonapi": {"version": "1.0"}, "data": hub})).into_response(),
        None => not_found(&format!("Hub {hub_id} does not exist")),
    }
}

async fn list_projects(
    State(db): State<Db>,
    Path(hub_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let store = db.read().await;
    let Some(projects) = store.projects.get(&hub_id) else {
        return not_found(&format!("Hub {hub_id} does not exist"));
    };
    let path = format!("/project/v1/hubs/{hub_id}/projects");
    let (data, links) = paginate(&path, projects.clone(), &query);
    Json(json!({"jsonapi": {"version": "1.0"}, "links": links, "data": data})).into_response()
}

async fn folder_contents(
    State(db): State<Db>,
    Path((project_id, folder_id)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if project_id != PROJECT_ID {
        return not_found(&format!("Project {project_id} does not exist"));
    }
    let store = db.read().await;
    let Some(contents) = store.folder_contents.get(&folder_id) else {
        return not_found(&format!("Folder {folder_id} does not exist"));
    };

    let types = list_filter(&query, "filter[type]");
    let entries: Vec<Value> = contents
        .iter()
        .filter(|entry| matches_filter(entry, "type", &types))
        .cloned()
        .collect();
    let path = format!("/data/v1/projects/{project_id}/folders/{folder_id}/contents");
    let (data, links) = paginate(&path, entries, &query);

    let included: Vec<Value> = data
        .iter()
        .filter_map(|entry| entry["relationships"]["tip"]["data"]["id"].as_str())
        .filter_map(|tip| store.included.iter().find(|version| version["id"] == tip))
        .cloned()
        .collect();

    Json(json!({
        "jsonapi": {"version": "1.0"},
        "links": links,
        "data": data,
        "included": included
    }))
    .into_response()
}

async fn list_refs(State(db): State<Db>, Path((_project_id, folder_id)): Path<(String, String)>) -> Json<Value> {
    let store = db.read().await;
    let refs = store.refs.get(&folder_id).cloned().unwrap_or_default();
    Json(json!({"jsonapi": {"version": "1.0"}, "data": refs}))
}

async fn create_ref(
    State(db): State<Db>,
    Path((_project_id, folder_id)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> Response {
    let data = &payload["data"];
    if data["type"].as_str().is_none() || data["id"].as_str().is_none() {
        return error_response(StatusCode::BAD_REQUEST, "Bad Request", "data.type and data.id are required");
    }
    let mut entry = data.clone();
    entry["meta"]["fromId"] = json!(folder_id);
    entry["meta"]["fromType"] = json!("folders");
    entry["meta"]["toId"] = data["id"].clone();
    entry["meta"]["toType"] = data["type"].clone();
    db.write().await.refs.entry(folder_id).or_default().push(entry);
    StatusCode::NO_CONTENT.into_response()
}

fn hooks_page(hooks: Vec<Hook>) -> Json<Value> {
    Json(json!({"links": {"next": null}, "data": hooks}))
}

async fn list_hooks(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let region = region(&headers);
    let store = db.read().await;
    let hooks = store
        .hooks
        .iter()
        .filter(|hook| hook.region == region)
        .filter(|hook| query.get("status").map_or(true, |status| &hook.status == status))
        .cloned()
        .collect();
    hooks_page(hooks)
}

async fn list_event_hooks(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((system, event)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let region = region(&headers);
    let store = db.read().await;
    let hooks = store
        .hooks
        .iter()
        .filter(|hook| hook.region == region && hook.system == system && hook.event == event)
        .filter(|hook| query.get("status").map_or(true, |status| &hook.status == status))
        .filter(|hook| query.get("scopeName").map_or(true, |name| hook.scope.contains_key(name)))
        .cloned()
        .collect();
    hooks_page(hooks)
}

async fn create_hook(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((system, event)): Path<(String, String)>,
    Json(input): Json<CreateHook>,
) -> Response {
    let Some(tenant) = input.scope.values().next().cloned() else {
        return error_response(StatusCode::BAD_REQUEST, "Bad Request", "scope must name one resource");
    };
    let mut store = db.write().await;
    let region = region(&headers);
    if store
        .hooks
        .iter()
        .any(|hook| hook.region == region && hook.event == event && hook.callback_url == input.callback_url && hook.tenant == tenant)
    {
        return error_response(StatusCode::CONFLICT, "Conflict", "Hook already exists for this scope");
    }

    let hook_id = Uuid::new_v4();
    let self_path = format!("/systems/{system}/events/{event}/hooks/{hook_id}");
    let hook = Hook {
        hook_id,
        tenant,
        callback_url: input.callback_url,
        created_by: "mock-app".to_string(),
        event,
        system,
        creator_type: "Application".to_string(),
        status: "active".to_string(),
        scope: input.scope,
        filter: input.filter,
        auto_reactivate_hook: input.auto_reactivate_hook,
        urn: format!("urn:adsk.webhooks:events.hook:{hook_id}"),
        self_path: self_path.clone(),
        region,
    };
    tracing::debug!(%hook_id, event = %hook.event, "hook created");
    store.hooks.push(hook);

    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/webhooks/v1{self_path}"))],
    )
        .into_response()
}

async fn get_hook(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((system, event, hook_id)): Path<(String, String, String)>,
) -> Response {
    let region = region(&headers);
    let store = db.read().await;
    match store.hooks.iter().find(|hook| {
        hook.region == region && hook.system == system && hook.event == event && hook.hook_id.to_string() == hook_id
    }) {
        Some(hook) => Json(hook.clone()).into_response(),
        None => not_found(&format!("Hook {hook_id} does not exist")),
    }
}

async fn patch_hook(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((system, event, hook_id)): Path<(String, String, String)>,
    Json(input): Json<ModifyHook>,
) -> Response {
    let region = region(&headers);
    let mut store = db.write().await;
    let Some(hook) = store.hooks.iter_mut().find(|hook| {
        hook.region == region && hook.system == system && hook.event == event && hook.hook_id.to_string() == hook_id
    }) else {
        return not_found(&format!("Hook {hook_id} does not exist"));
    };
    if let Some(status) = input.status {
        hook.status = status;
    }
    if let Some(filter) = input.filter {
        hook.filter = Some(filter);
    }
    if let Some(auto_reactivate_hook) = input.auto_reactivate_hook {
        hook.auto_reactivate_hook = Some(auto_reactivate_hook);
    }
    StatusCode::OK.into_response()
}

async fn delete_hook(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((system, event, hook_id)): Path<(String, String, String)>,
) -> Response {
    let region = region(&headers);
    let mut store = db.write().await;
    let before = store.hooks.len();
    store.hooks.retain(|hook| {
        !(hook.region == region && hook.system == system && hook.event == event && hook.hook_id.to_string() == hook_id)
    });
    if store.hooks.len() == before {
        return not_found(&format!("Hook {hook_id} does not exist"));
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn create_token(State(db): State<Db>, headers: HeaderMap, Json(input): Json<TokenInput>) -> Response {
    let region = region(&headers);
    let mut store = db.write().await;
    if store.tokens.contains_key(&region) {
        return error_response(StatusCode::BAD_REQUEST, "Bad Request", "A token already exists for this application");
    }
    store.tokens.insert(region, input.token);
    Json(json!({"status": 200, "detail": ["Token has been successfully created"]})).into_response()
}

async fn replace_token(State(db): State<Db>, headers: HeaderMap, Json(input): Json<TokenInput>) -> Response {
    let region = region(&headers);
    let mut store = db.write().await;
    match store.tokens.get_mut(&region) {
        Some(token) => {
            *token = input.token;
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("No token exists for this application"),
    }
}

async fn delete_token(State(db): State<Db>, headers: HeaderMap) -> Response {
    let region = region(&headers);
    match db.write().await.tokens.remove(&region) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found("No token exists for this application"),
    }
}
