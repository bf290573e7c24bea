//! Webhooks resources: hooks and the secret token used to sign callbacks.

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{HookStatus, WebhookSystem};

/// A registered webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    #[serde(default)]
    pub hook_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(default)]
    pub callback_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<WebhookSystem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<HookStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_reactivate_hook: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scope: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_attribute: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_expiry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_with_event_payload_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,
    #[serde(rename = "__self__", default, skip_serializing_if = "Option::is_none")]
    pub self_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HooksLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// One page of hooks. Further pages are requested with `page_state`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hooks {
    #[serde(default)]
    pub links: HooksLinks,
    #[serde(default)]
    pub data: Vec<Hook>,
}

impl Hooks {
    /// `pageState` to pass for the next page, taken from `links.next`.
    ///
    /// The link carries the cursor percent-encoded; it is decoded here since
    /// the marshaler encodes query values again.
    pub fn next_page_state(&self) -> Option<String> {
        let next = self.links.next.as_deref()?;
        let query = next.split_once('?').map_or(next, |(_, query)| query);
        let state = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("pageState="))
            .filter(|state| !state.is_empty())?;
        // Not UTF-8 once decoded: hand back the link's own text.
        let decoded = percent_decode_str(state)
            .decode_utf8()
            .map_or_else(|_| state.to_string(), |decoded| decoded.into_owned());
        Some(decoded)
    }
}

/// Answer to creating hooks for every event of a system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatedHooks {
    #[serde(default)]
    pub hooks: Vec<Hook>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookPayload {
    pub callback_url: String,
    /// e.g. `{"folder": "urn:adsk.wipprod:fs.folder:co.abc"}`
    pub scope: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_attribute: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_reactivate_hook: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_expiry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_with_event_payload_only: Option<bool>,
}

impl HookPayload {
    pub fn new(callback_url: &str, scope_name: &str, scope_value: &str) -> Self {
        Self {
            callback_url: callback_url.to_string(),
            scope: BTreeMap::from([(scope_name.to_string(), scope_value.to_string())]),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyHookPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<HookStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_reactivate_hook: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_attribute: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_expiry: Option<String>,
}

/// Secret used to sign callback payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub detail: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn hooks_page_parses() {
        let hooks: Hooks = serde_json::from_value(json!({
            "links": {"next": "/webhooks/v1/hooks?pageState=AH0AAAAA&status=active"},
            "data": [{
                "hookId": "0f60f6a0-996c-11e7-abf3-51d68cff984c",
                "tenant": "urn:adsk.wipprod:fs.folder:co.abc",
                "callbackUrl": "http://example.com/callback",
                "createdBy": "app",
                "event": "dm.version.added",
                "createdDate": "2017-09-15T17:48:53.355+0000",
                "system": "data",
                "creatorType": "Application",
                "status": "active",
                "scope": {"folder": "urn:adsk.wipprod:fs.folder:co.abc"},
                "urn": "urn:adsk.webhooks:events.hook:0f60f6a0",
                "__self__": "/systems/data/events/dm.version.added/hooks/0f60f6a0"
            }]
        }))
        .unwrap();

        assert_eq!(hooks.next_page_state().as_deref(), Some("AH0AAAAA"));
        let hook = &hooks.data[0];
        assert_eq!(hook.system, Some(WebhookSystem::Data));
        assert_eq!(hook.status, Some(HookStatus::Active));
        assert_eq!(hook.scope["folder"], "urn:adsk.wipprod:fs.folder:co.abc");
        assert_eq!(hook.self_path.as_deref(), Some("/systems/data/events/dm.version.added/hooks/0f60f6a0"));
    }

    #[test]
    fn escaped_page_state_is_decoded() {
        let hooks = Hooks {
            links: HooksLinks {
                next: Some("/webhooks/v1/hooks?pageState=AH0%2BAA%2F%3D%3D&status=active".to_string()),
            },
            data: Vec::new(),
        };
        assert_eq!(hooks.next_page_state().as_deref(), Some("AH0+AA/=="));
    }

    #[test]
    fn last_page_has_no_page_state() {
        let hooks: Hooks = serde_json::from_value(json!({"links": {"next": null}, "data": []})).unwrap();
        assert!(hooks.next_page_state().is_none());
        assert!(Hooks::default().next_page_state().is_none());
    }

    #[test]
    fn hook_payload_serializes_camel_case() {
        let mut payload = HookPayload::new("https://cb", "folder", "urn:f");
        payload.auto_reactivate_hook = Some(true);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"callbackUrl": "https://cb", "scope": {"folder": "urn:f"}, "autoReactivateHook": true})
        );
    }

    #[test]
    fn modify_payload_sends_only_set_fields() {
        let payload = ModifyHookPayload {
            status: Some(HookStatus::Inactive),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"status": "inactive"}));
    }
}
