//! One module per API group. Each operation has a pure `build_*` method and
//! an async method that sends the request and interprets the response.

mod commands;
mod folders;
mod hooks;
mod hubs;
mod items;
mod projects;
mod tokens;
mod versions;

pub use commands::CommandsApi;
pub use folders::{FolderContentsQuery, FolderSearchQuery, FoldersApi, RefsQuery, RelationshipRefsQuery};
pub use hooks::{AppHooksQuery, HooksApi, HooksQuery, SystemEventHooksQuery};
pub use hubs::{HubsApi, HubsQuery};
pub use items::{ItemVersionsQuery, ItemsApi};
pub use projects::{ProjectsApi, ProjectsQuery, TopFoldersQuery};
pub use tokens::TokensApi;
pub use versions::VersionsApi;

pub(crate) const DATA_MANAGEMENT: &str = "DATA-MANAGEMENT";
pub(crate) const WEBHOOKS: &str = "WEBHOOKS";

pub(crate) const DATA_READ: &[&str] = &["data:read"];
pub(crate) const DATA_WRITE: &[&str] = &["data:write"];
pub(crate) const DATA_CREATE: &[&str] = &["data:create"];
pub(crate) const DATA_SEARCH: &[&str] = &["data:search"];
