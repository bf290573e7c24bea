//! Client SDK for the Autodesk Platform Services Data Management and
//! Webhooks REST APIs.
//!
//! # Overview
//! Every REST operation is described once as an `Operation` constant and
//! exposed twice on its API group: a pure `build_*` method producing an
//! `HttpRequest`, and an async method that sends it through the client's
//! `Transport` and interprets the `HttpResponse`. Callers that own their
//! HTTP stack can use only the build half and pass responses to
//! `interpret` (host-does-IO).
//!
//! # Design
//! - `ApsClient` is immutable; the transport is injected, never global.
//! - Parameter values that are unset (empty strings, non-positive numbers,
//!   empty lists, the epoch date) are left out of the request.
//! - Non-2xx statuses are errors. `Lenient::lenient` turns them back into
//!   default-valued results for callers that inspect the status instead.
//! - Models are defined independently from the mock-server crate; the
//!   integration tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod marshal;
pub mod models;
pub mod params;
pub mod transport;

pub use client::ApsClient;
pub use config::ClientConfig;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use marshal::{interpret, interpret_raw, ApiResponse, Lenient, Marshaler, Operation, Params};
pub use params::{ListStyle, ParamValue, WireEnum};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
