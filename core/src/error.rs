//! Error types for the APS client.
//!
//! # Design
//! Every failure is local to one call. Marshaling problems surface before any
//! request leaves the process (`Configuration`, `Serialization`); everything
//! after that is either the transport failing or the service answering with a
//! non-2xx status. `Status` keeps the whole response so callers can inspect
//! headers and body.

use serde::Deserialize;

use crate::http::HttpResponse;

/// Errors returned by the marshaler and the API groups.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be built, e.g. a path parameter is missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service returned a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        message: String,
        response: Box<HttpResponse>,
    },

    /// A 2xx body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    pub(crate) fn from_response(response: HttpResponse) -> Self {
        let message = service_message(&response.body).unwrap_or_else(|| {
            let body = response.body.trim();
            if body.is_empty() {
                "empty response body".to_string()
            } else {
                body.to_string()
            }
        });
        ApiError::Status {
            status: response.status,
            message,
            response: Box::new(response),
        }
    }

    /// Status code of a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The response attached to a `Status` error.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            ApiError::Status { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Failure reported by a `Transport` implementation.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub timed_out: bool,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
            source: None,
        }
    }

    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            timed_out: false,
            source: Some(Box::new(source)),
        }
    }
}

/// Error bodies seen across the Data Management and Webhooks services.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
    detail: Option<String>,
    #[serde(rename = "developerMessage")]
    developer_message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    detail: Option<String>,
    title: Option<String>,
}

fn service_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .errors
        .into_iter()
        .find_map(|entry| entry.detail.or(entry.title))
        .or(parsed.detail)
        .or(parsed.developer_message)
        .filter(|message| !message.is_empty())
}
