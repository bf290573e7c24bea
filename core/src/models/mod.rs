//! Data contracts exchanged with the service.
//!
//! These are plain serde records. Every response type is `Default` so a
//! failed call can still yield a value in lenient mode.

pub mod data;
pub mod enums;
pub mod jsonapi;
pub mod webhooks;

pub use data::*;
pub use enums::{FilterType, HookStatus, RefDirection, RefType, Region, SortOrder, WebhookSystem};
pub use jsonapi::{Document, JsonApiVersion, Link, Links, Relationship, RelationshipData, Resource, ResourceIdentifier};
pub use webhooks::{CreatedHooks, Hook, HookPayload, Hooks, HooksLinks, ModifyHookPayload, Token, TokenPayload};
