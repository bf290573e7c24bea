//! Data Management resources: hubs, projects, folders, items, versions,
//! downloads and commands.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::jsonapi::{Document, Link, Resource};
use crate::models::{RefDirection, RefType};

/// Type-specific `extension` block carried by most resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Extension {
    pub fn new(kind: &str, version: &str) -> Self {
        Self {
            kind: kind.to_string(),
            version: version.to_string(),
            schema: None,
            data: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HubAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<Extension>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<Extension>,
}

/// Attributes of folders, items and versions.
///
/// The three share most fields and folder contents mix them in one list,
/// so a single record covers all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_time_rollup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_in_project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<Extension>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadFormat {
    pub file_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<DownloadFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadFormatsAttributes {
    #[serde(default)]
    pub formats: Vec<DownloadFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobAttributes {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<Extension>,
}

/// `meta` block of a relationship reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefMeta {
    pub ref_type: RefType,
    pub direction: RefDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_type: Option<String>,
    pub extension: Extension,
}

pub type Entity = Resource<EntityAttributes>;

pub type Hubs = Document<Vec<Resource<HubAttributes>>>;
pub type Hub = Document<Resource<HubAttributes>>;
pub type Projects = Document<Vec<Resource<ProjectAttributes>>>;
pub type Project = Document<Resource<ProjectAttributes>>;
pub type TopFolders = Document<Vec<Entity>>;
pub type Folder = Document<Entity>;
pub type FolderContents = Document<Vec<Entity>, Entity>;
pub type Refs = Document<Vec<Entity>, Entity>;
pub type Search = Document<Vec<Entity>, Entity>;
pub type RelationshipLinks = Document<Vec<Resource<Value>>>;
pub type RelationshipRefs = Document<Vec<Resource<Value>>, Entity>;
pub type Item = Document<Entity, Entity>;
pub type ItemTip = Document<Entity>;
pub type CreatedItem = Document<Entity, Entity>;
pub type Versions = Document<Vec<Entity>>;
pub type Version = Document<Entity>;
pub type CreatedVersion = Document<Entity>;
pub type Download = Document<Resource<DownloadAttributes>>;
pub type Downloads = Document<Vec<Resource<DownloadAttributes>>>;
pub type DownloadFormats = Document<Resource<DownloadFormatsAttributes>>;
pub type Job = Document<Resource<JobAttributes>>;
pub type CreatedDownload = Document<Vec<Resource<JobAttributes>>>;
pub type Storage = Document<Resource<Value>>;
pub type Command = Document<Resource<CommandAttributes>, Entity>;

pub type FolderPayload = Document<Entity>;
pub type ItemPayload = Document<Entity, Entity>;
pub type VersionPayload = Document<Entity>;
pub type ModifyPayload = Document<Entity>;
pub type DownloadPayload = Document<Resource<DownloadAttributes>>;
pub type StoragePayload = Document<Resource<Value>>;
pub type RelationshipRefsPayload = Document<Resource<Value>>;
pub type CommandPayload = Document<Resource<CommandAttributes>>;

/// Auxiliary attachment reference from the URL's resource to `target`, as
/// sent to the `relationships/refs` endpoints.
pub fn relationship_ref(target_kind: &str, target_id: &str) -> RelationshipRefsPayload {
    let meta = json!({
        "refType": "auxiliary",
        "direction": "from",
        "extension": {"type": "Auxiliary:autodesk.core:Attachment", "version": "1.0"},
    });
    Document::new(Resource::new(target_kind, target_id).with_meta(meta))
}

/// Typed view of the `meta` block of an entry returned by a
/// `relationships/refs` endpoint.
pub fn ref_meta(entry: &Resource<Value>) -> Option<RefMeta> {
    entry
        .meta
        .as_ref()
        .and_then(|meta| serde_json::from_value(meta.clone()).ok())
}
