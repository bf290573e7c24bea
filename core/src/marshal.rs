//! Request marshaling and response interpretation.
//!
//! # Design
//! Every REST operation is an `Operation` constant: method, route template,
//! product name and advisory scopes. `Marshaler::build` turns an operation
//! plus its `Params` into an `HttpRequest`; `interpret` and `interpret_raw`
//! turn the `HttpResponse` back into a typed value or an `ApiError`. The API
//! groups are thin typed wrappers over these two steps.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{find_header, HttpMethod, HttpRequest, HttpResponse};
use crate::params::{ParamValue, Placement};

/// Characters escaped inside a single path segment. `:` and `.` stay
/// literal so URNs read naturally; `/` is escaped.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\');

/// Characters escaped in query keys and values. Brackets and commas are
/// preserved for `page[limit]` style keys and joined lists.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\');

pub const JSON: &str = "application/json";
pub const JSON_API: &str = "application/vnd.api+json";

/// Description of one REST endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Product name reported in the `User-Agent` header.
    pub product: &'static str,
    pub id: &'static str,
    pub method: HttpMethod,
    /// Route with `{name}` placeholders, relative to the base URL.
    pub template: &'static str,
    /// Scopes the token needs. Logged, never enforced.
    pub scopes: &'static [&'static str],
    /// Content type of the request body, when the operation sends one.
    pub content_type: &'static str,
}

impl Operation {
    pub const fn new(
        product: &'static str,
        id: &'static str,
        method: HttpMethod,
        template: &'static str,
    ) -> Self {
        Self {
            product,
            id,
            method,
            template,
            scopes: &[],
            content_type: JSON,
        }
    }

    pub const fn scopes(mut self, scopes: &'static [&'static str]) -> Self {
        self.scopes = scopes;
        self
    }

    pub const fn content_type(mut self, content_type: &'static str) -> Self {
        self.content_type = content_type;
        self
    }
}

/// Logical parameters of one call, classified by placement.
#[derive(Debug, Clone, Default)]
pub struct Params {
    path: Vec<(&'static str, String)>,
    query: Vec<(&'static str, ParamValue)>,
    headers: Vec<(&'static str, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn path(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn query(mut self, name: &'static str, value: impl Into<ParamValue>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<ParamValue>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

/// Builds requests against a fixed base URL. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct Marshaler {
    base_url: String,
}

impl Marshaler {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request for an operation without a body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if a route placeholder has no value.
    pub fn build(
        &self,
        operation: &Operation,
        params: &Params,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.assemble(operation, params, None, access_token)
    }

    /// Build a request whose payload is serialized to JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if a route placeholder has no value,
    /// or `ApiError::Serialization` if the payload cannot be encoded.
    pub fn build_with_body<B: Serialize + ?Sized>(
        &self,
        operation: &Operation,
        params: &Params,
        body: &B,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.assemble(operation, params, Some(body), access_token)
    }

    fn assemble(
        &self,
        operation: &Operation,
        params: &Params,
        body: Option<String>,
        access_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let path = resolve_path(operation, &params.path)?;

        let mut url = format!("{}{path}", self.base_url);
        let mut separator = '?';
        for (name, value) in &params.query {
            for rendered in value.render(Placement::Query) {
                url.push(separator);
                url.extend(utf8_percent_encode(name, QUERY_COMPONENT));
                url.push('=');
                url.extend(utf8_percent_encode(&rendered, QUERY_COMPONENT));
                separator = '&';
            }
        }

        let mut headers = vec![
            ("Accept".to_string(), JSON.to_string()),
            ("User-Agent".to_string(), user_agent(operation.product)),
        ];
        if !access_token.is_empty() {
            headers.push(("Authorization".to_string(), format!("Bearer {access_token}")));
        }

        let mut content_headers = Vec::new();
        if body.is_some() {
            content_headers.push(("Content-Type".to_string(), operation.content_type.to_string()));
        }

        for (name, value) in &params.headers {
            let target = if name.eq_ignore_ascii_case("Content-Range") {
                &mut content_headers
            } else {
                &mut headers
            };
            for rendered in value.render(Placement::Header) {
                target.push(((*name).to_string(), rendered));
            }
        }

        tracing::debug!(
            operation = operation.id,
            method = %operation.method,
            url = %url,
            scopes = ?operation.scopes,
            has_body = body.is_some(),
            "built request"
        );

        Ok(HttpRequest {
            method: operation.method,
            url,
            headers,
            content_headers,
            body,
        })
    }
}

fn user_agent(product: &str) -> String {
    format!("APS SDK/{product}/Rust/{}", env!("CARGO_PKG_VERSION"))
}

/// Substitute every `{name}` placeholder of the operation's template.
fn resolve_path(operation: &Operation, values: &[(&'static str, String)]) -> Result<String, ApiError> {
    let mut resolved = String::with_capacity(operation.template.len());
    let mut rest = operation.template;

    while let Some(start) = rest.find('{') {
        resolved.push_str(&rest[..start]);
        let Some(len) = rest[start..].find('}') else {
            return Err(ApiError::Configuration(format!(
                "{}: unterminated placeholder in `{}`",
                operation.id, operation.template
            )));
        };
        let name = &rest[start + 1..start + len];
        let value = values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                ApiError::Configuration(format!("{}: missing path parameter `{name}`", operation.id))
            })?;
        resolved.extend(utf8_percent_encode(value, PATH_SEGMENT));
        rest = &rest[start + len + 1..];
    }
    resolved.push_str(rest);

    Ok(resolved)
}

/// A successful call: status, headers and the typed body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub value: T,
}

impl<T> ApiResponse<T> {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Interpret a response whose body deserializes into `T`.
///
/// An empty 2xx body is read as JSON `null`, so `Option<_>` and `()` accept
/// `204 No Content`.
///
/// # Errors
///
/// `ApiError::Status` for non-2xx, `ApiError::Deserialization` for a body that
/// does not match `T`.
pub fn interpret<T: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<T>, ApiError> {
    let response = interpret_raw(response)?;
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    let value = serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;

    Ok(ApiResponse {
        status: response.status,
        headers: response.headers,
        value,
    })
}

/// Interpret a response whose meaning is the response itself, as for
/// relationship-creation endpoints answering 201/204.
///
/// # Errors
///
/// `ApiError::Status` for non-2xx.
pub fn interpret_raw(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    tracing::warn!(status = response.status, "request failed");
    Err(ApiError::from_response(response))
}

/// Status-inspection mode: turn a non-2xx failure into a regular result.
///
/// Transport, marshaling and deserialization failures are left untouched.
pub trait Lenient: Sized {
    #[must_use]
    fn lenient(self) -> Self;
}

impl<T: Default> Lenient for Result<ApiResponse<T>, ApiError> {
    fn lenient(self) -> Self {
        match self {
            Err(ApiError::Status { response, .. }) => {
                let HttpResponse { status, headers, .. } = *response;
                Ok(ApiResponse {
                    status,
                    headers,
                    value: T::default(),
                })
            }
            other => other,
        }
    }
}

impl Lenient for Result<HttpResponse, ApiError> {
    fn lenient(self) -> Self {
        match self {
            Err(ApiError::Status { response, .. }) => Ok(*response),
            other => other,
        }
    }
}
