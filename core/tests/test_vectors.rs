//! Verify build and interpret steps against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected results. Bodies are compared as parsed JSON, not raw
//! strings, so field order does not matter.

use aps_core::api::{FolderContentsQuery, SystemEventHooksQuery};
use aps_core::models::{FilterType, FolderContents, HookPayload, HookStatus, Hooks, Region, WebhookSystem};
use aps_core::{interpret, interpret_raw, ApiError, ApsClient, ClientConfig, HttpMethod, HttpRequest, HttpResponse};
use serde_json::Value;

fn client() -> ApsClient<()> {
    ApsClient::new(&ClientConfig::default(), ())
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().map(|v| v.as_str().unwrap().to_string()).collect())
        .unwrap_or_default()
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|pair| (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Check method, URL, expected and absent headers, content type and body.
fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");

    for (header, value) in pairs(&expected["headers"]) {
        assert_eq!(req.header(&header), Some(value.as_str()), "{name}: header {header}");
    }
    for header in strings(&expected["absent_headers"]) {
        assert!(req.header(&header).is_none(), "{name}: unexpected header {header}");
        assert!(req.content_header(&header).is_none(), "{name}: unexpected content header {header}");
    }

    match expected.get("body") {
        Some(body) => {
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&sent, body, "{name}: body");
            assert_eq!(
                req.content_header("Content-Type"),
                expected["content_type"].as_str(),
                "{name}: content type"
            );
        }
        None => assert!(req.body.is_none(), "{name}: unexpected body"),
    }
}

fn simulated_response(response: &Value) -> HttpResponse {
    HttpResponse {
        status: response["status"].as_u64().unwrap() as u16,
        headers: pairs(&response["headers"]),
        body: match &response["body"] {
            Value::Null => String::new(),
            body => body.to_string(),
        },
    }
}

fn check_error(name: &str, err: ApiError, expected: &Value) {
    assert_eq!(
        err.status().map(u64::from),
        expected["status"].as_u64(),
        "{name}: status"
    );
    assert_eq!(err.to_string(), expected["message"].as_str().unwrap(), "{name}: message");
}

// ---------------------------------------------------------------------------
// Folder contents
// ---------------------------------------------------------------------------

#[test]
fn folder_contents_vectors() {
    let raw = include_str!("../../test-vectors/folder_contents.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        let query = FolderContentsQuery {
            x_user_id: input["x_user_id"].as_str().map(str::to_string),
            filter_type: strings(&input["filter_type"])
                .iter()
                .map(|t| t.parse::<FilterType>().unwrap())
                .collect(),
            filter_extension_type: strings(&input["filter_extension_type"]),
            page_number: input["page_number"].as_i64().unwrap_or(0) as i32,
            page_limit: input["page_limit"].as_i64().unwrap_or(0) as i32,
            include_hidden: input["include_hidden"].as_bool(),
            ..Default::default()
        };

        let req = c
            .folders()
            .build_get_folder_contents(
                input["project_id"].as_str().unwrap(),
                input["folder_id"].as_str().unwrap(),
                &query,
                "tok",
            )
            .unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = interpret::<FolderContents>(simulated_response(&case["response"]));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error);
            continue;
        }

        let contents = result.unwrap().into_value();
        let expected = &case["expected"];
        let ids: Vec<String> = contents.data.iter().map(|entry| entry.id.clone()).collect();
        assert_eq!(ids, strings(&expected["ids"]), "{name}: ids");
        assert_eq!(contents.included.len() as u64, expected["included"].as_u64().unwrap(), "{name}: included");
        assert_eq!(contents.next_page(), expected["next_page"].as_str(), "{name}: next page");
    }
}

// ---------------------------------------------------------------------------
// System event hooks
// ---------------------------------------------------------------------------

#[test]
fn hooks_vectors() {
    let raw = include_str!("../../test-vectors/hooks.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let system: WebhookSystem = input["system"].as_str().unwrap().parse().unwrap();
        let event = input["event"].as_str().unwrap();
        let response = simulated_response(&case["response"]);

        match case["kind"].as_str().unwrap() {
            "list" => {
                let query = SystemEventHooksQuery {
                    scope_name: input["scope_name"].as_str().map(str::to_string),
                    status: input["status"].as_str().map(|s| s.parse::<HookStatus>().unwrap()),
                    region: input["region"].as_str().map(|r| r.parse::<Region>().unwrap()),
                    ..Default::default()
                };
                let req = c
                    .hooks()
                    .build_get_system_event_hooks(system, event, &query, "tok")
                    .unwrap();
                check_request(name, &req, &case["expected_request"]);

                let hooks = interpret::<Hooks>(response).unwrap().into_value();
                let expected = &case["expected"];
                let ids: Vec<String> = hooks.data.iter().map(|hook| hook.hook_id.clone()).collect();
                assert_eq!(ids, strings(&expected["hook_ids"]), "{name}: hook ids");
                assert_eq!(hooks.next_page_state().as_deref(), expected["page_state"].as_str(), "{name}: page state");
            }
            "create" => {
                let payload = HookPayload::new(
                    input["callback_url"].as_str().unwrap(),
                    input["scope_name"].as_str().unwrap(),
                    input["scope_value"].as_str().unwrap(),
                );
                let req = c
                    .hooks()
                    .build_create_system_event_hook(system, event, &payload, None, "tok")
                    .unwrap();
                check_request(name, &req, &case["expected_request"]);

                let result = interpret_raw(response);
                if let Some(expected_error) = case.get("expected_error") {
                    check_error(name, result.unwrap_err(), expected_error);
                    continue;
                }
                let response = result.unwrap();
                assert_eq!(
                    response.header("Location"),
                    case["expected"]["location"].as_str(),
                    "{name}: location"
                );
            }
            other => panic!("{name}: unknown kind {other}"),
        }
    }
}
