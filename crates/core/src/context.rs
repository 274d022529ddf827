//! Per-request web context.
//!
//! The authorization layer never interprets the transport; it only asks the
//! context for the request method, parameters and headers, and may write
//! response headers.

use std::collections::BTreeMap;

/// HTTP request method as seen by authorizers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Options,
    Post,
    Put,
    Patch,
    Delete,
    Other(String),
}

impl HttpMethod {
    /// Parse a method name (case-insensitive). Unknown verbs are kept as-is.
    pub fn parse(method: &str) -> Self {
        match method.trim().to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            other => Self::Other(other.to_string()),
        }
    }

    /// Methods that change server state and therefore carry CSRF risk.
    pub fn is_state_changing(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch | Self::Delete)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Other(m) => m,
        }
    }
}

impl core::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque per-request bag handed verbatim to every authorizer.
pub trait WebContext {
    fn request_method(&self) -> HttpMethod;

    /// Query or form parameter.
    fn request_parameter(&self, name: &str) -> Option<String>;

    /// Request header; header names are case-insensitive.
    fn request_header(&self, name: &str) -> Option<String>;

    fn set_response_header(&mut self, name: &str, value: &str);
}

/// Self-contained [`WebContext`] backed by in-memory maps.
///
/// Useful for adapters that have already parsed the request, and for tests.
#[derive(Debug, Clone)]
pub struct InMemoryWebContext {
    method: HttpMethod,
    parameters: BTreeMap<String, String>,
    request_headers: BTreeMap<String, String>,
    response_headers: BTreeMap<String, String>,
}

impl Default for InMemoryWebContext {
    fn default() -> Self {
        Self::new(HttpMethod::Get)
    }
}

impl InMemoryWebContext {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            parameters: BTreeMap::new(),
            request_headers: BTreeMap::new(),
            response_headers: BTreeMap::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.request_headers
            .insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Response header written by an authorizer, if any.
    pub fn response_header(&self, name: &str) -> Option<&str> {
        self.response_headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

impl WebContext for InMemoryWebContext {
    fn request_method(&self) -> HttpMethod {
        self.method.clone()
    }

    fn request_parameter(&self, name: &str) -> Option<String> {
        self.parameters.get(name).cloned()
    }

    fn request_header(&self, name: &str) -> Option<String> {
        self.request_headers.get(&name.to_ascii_lowercase()).cloned()
    }

    fn set_response_header(&mut self, name: &str, value: &str) {
        self.response_headers
            .insert(name.to_ascii_lowercase(), value.to_string());
    }
}
