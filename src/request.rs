use std::collections::HashMap;

use serde::Serialize;

/// The portion of Envoy's ext-authz attribute tree the pipeline cares about
/// (spec.md §3, "Request"). Read-only once built; the gRPC transport (out of
/// scope) is responsible for lower-casing header names before constructing
/// one of these.
#[derive(Debug, Clone, Serialize)]
pub struct HttpRequestInfo {
    /// Header name (already lower-cased) -> raw value.
    pub headers: HashMap<String, String>,
    /// URL path including query string, e.g. `/p?foo=1&token=xyz`.
    pub path: String,
    pub method: String,
    pub host: String,
    pub scheme: String,
    /// Present only when the caller's config opted into buffering the body.
    pub body: Option<String>,
}

impl HttpRequestInfo {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Convenience constructor for tests and embedders that haven't already
    /// lower-cased their header names.
    pub fn builder() -> HttpRequestInfoBuilder {
        HttpRequestInfoBuilder::default()
    }
}

#[derive(Default)]
pub struct HttpRequestInfoBuilder {
    headers: HashMap<String, String>,
    path: String,
    method: String,
    host: String,
    scheme: String,
    body: Option<String>,
}

impl HttpRequestInfoBuilder {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn build(self) -> HttpRequestInfo {
        HttpRequestInfo {
            headers: self.headers,
            path: self.path,
            method: self.method,
            host: self.host,
            scheme: self.scheme,
            body: self.body,
        }
    }
}
