//! JSON:API envelope shared by every Data Management response and payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonApiVersion {
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Links {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_view: Option<Link>,
}

/// Top-level document. `data` is a single resource or a list; `included`
/// carries side-loaded resources such as the tip version of an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "D: Serialize, I: Serialize",
    deserialize = "D: Deserialize<'de> + Default, I: Deserialize<'de>"
))]
pub struct Document<D, I = Resource<Value>> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<JsonApiVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(default)]
    pub data: D,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<I>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl<D, I> Document<D, I> {
    /// Wrap `data` in a payload document declaring JSON:API 1.0.
    pub fn new(data: D) -> Self {
        Self {
            jsonapi: Some(JsonApiVersion {
                version: "1.0".to_string(),
            }),
            links: None,
            data,
            included: Vec::new(),
            meta: None,
        }
    }

    #[must_use]
    pub fn with_included(mut self, included: Vec<I>) -> Self {
        self.included = included;
        self
    }

    /// `href` of the next page, if the service paginated the result.
    pub fn next_page(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|links| links.next.as_ref())
            .map(|link| link.href.as_str())
    }
}

/// A resource object: type, id, attributes and relationships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource<A> {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<A>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl<A> Resource<A> {
    pub fn new(kind: &str, id: &str) -> Self {
        Self {
            kind: kind.to_string(),
            id: id.to_string(),
            attributes: None,
            relationships: BTreeMap::new(),
            links: None,
            meta: None,
        }
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: A) -> Self {
        self.attributes = Some(attributes);
        self
    }

    #[must_use]
    pub fn with_relationship(mut self, name: &str, target: ResourceIdentifier) -> Self {
        self.relationships.insert(
            name.to_string(),
            Relationship {
                data: Some(RelationshipData::One(target)),
                ..Default::default()
            },
        );
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Target of a to-one relationship.
    pub fn related(&self, name: &str) -> Option<&ResourceIdentifier> {
        match self.relationships.get(name)?.data.as_ref()? {
            RelationshipData::One(target) => Some(target),
            RelationshipData::Many(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(kind: &str, id: &str) -> Self {
        Self {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RelationshipData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}
