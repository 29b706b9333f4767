//! Extraction of the routing key from `http` request types.
//!
//! The router only needs the method, the path and the content-type. Adapters
//! for specific platforms turn their events into an [`http::Request`] (or
//! build a [`RouteKey`] directly) and call [`RouteTable::resolve_key`].

use http::header::{HeaderMap, HeaderName, CONTENT_TYPE};
use http::request::Parts;
use http::{Method, Request};

use crate::error::NotFound;
use crate::matcher::content_type_or_wildcard;
use crate::method::HttpMethod;
use crate::route::Route;
use crate::table::RouteTable;

/// The three values a request is routed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteKey<'a> {
    /// Request method.
    pub method: &'a Method,
    /// Request path, without query string.
    pub path: &'a str,
    /// Content-type header value, if present.
    pub content_type: Option<&'a str>,
}

impl<'a> RouteKey<'a> {
    /// Creates a key from its parts.
    #[must_use]
    pub fn new(method: &'a Method, path: &'a str, content_type: Option<&'a str>) -> Self {
        Self {
            method,
            path,
            content_type,
        }
    }

    /// Reads the key from request parts, using the `content-type` header.
    #[must_use]
    pub fn from_parts(parts: &'a Parts) -> Self {
        Self::from_parts_with_header(parts, &CONTENT_TYPE)
    }

    /// Reads the key from request parts, using a custom content-type header.
    #[must_use]
    pub fn from_parts_with_header(parts: &'a Parts, header: &HeaderName) -> Self {
        Self::new(&parts.method, parts.uri.path(), header_value(&parts.headers, header))
    }

    /// Reads the key from a request, using the `content-type` header.
    #[must_use]
    pub fn from_request<B>(request: &'a Request<B>) -> Self {
        Self::from_request_with_header(request, &CONTENT_TYPE)
    }

    /// Reads the key from a request, using a custom content-type header.
    #[must_use]
    pub fn from_request_with_header<B>(request: &'a Request<B>, header: &HeaderName) -> Self {
        Self::new(
            request.method(),
            request.uri().path(),
            header_value(request.headers(), header),
        )
    }

    /// The content-type the table looks this key up under.
    ///
    /// An absent or empty value is the wildcard `*`.
    #[must_use]
    pub fn content_type_or_wildcard(&self) -> &'a str {
        content_type_or_wildcard(self.content_type)
    }
}

// Missing, empty and non-UTF-8 values all count as "no content-type".
fn header_value<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

impl<H> RouteTable<H> {
    /// Resolves a [`RouteKey`].
    ///
    /// Methods outside [`HttpMethod`] never match.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] when no route matches.
    pub fn resolve_key(&self, key: &RouteKey<'_>) -> Result<&Route<H>, NotFound> {
        match HttpMethod::from_http(key.method) {
            Some(method) => self.resolve(method, key.path, key.content_type),
            None => Err(NotFound::new(
                key.method.as_str(),
                key.path,
                key.content_type_or_wildcard(),
            )),
        }
    }

    /// Resolves an [`http::Request`] by its method, path and `content-type` header.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] when no route matches.
    pub fn resolve_request<B>(&self, request: &Request<B>) -> Result<&Route<H>, NotFound> {
        self.resolve_key(&RouteKey::from_request(request))
    }
}
