//! Error types for route table construction and resolution.
//!
//! Building a table can fail with a [`ConfigurationError`]; that is fatal to
//! startup. Resolving a request can fail with [`NotFound`], which is an
//! ordinary per-request outcome.

use std::fmt;

use http::StatusCode;
use thiserror::Error;

use crate::method::HttpMethod;

/// Field of a route declaration, used to name the culprit of an empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationField {
    /// The method set.
    Method,
    /// The path matchers.
    Path,
    /// The content-type matchers.
    ContentType,
}

impl fmt::Display for DeclarationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Method => "method",
            Self::Path => "path",
            Self::ContentType => "content-type",
        })
    }
}

/// Errors raised while building a route table.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Two entries share the same method, literal path and literal content-type.
    #[error("route method: {method}, path: {path}, content-type: {content_type} already exists")]
    DuplicateRoute {
        /// Method of the colliding entry.
        method: HttpMethod,
        /// Literal path of the colliding entry.
        path: String,
        /// Literal content-type of the colliding entry.
        content_type: String,
    },

    /// A declaration was given an empty collection.
    #[error("route declaration has an empty {field} set")]
    EmptySet {
        /// Which field was empty.
        field: DeclarationField,
    },

    /// A pattern failed to compile.
    #[error("invalid route pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern source text.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A method token outside the supported enumeration.
    #[error("unsupported HTTP method: {0}")]
    UnknownMethod(String),
}

impl ConfigurationError {
    /// Create a duplicate route error.
    pub fn duplicate(
        method: HttpMethod,
        path: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self::DuplicateRoute {
            method,
            path: path.into(),
            content_type: content_type.into(),
        }
    }

    /// Create an empty set error.
    pub fn empty(field: DeclarationField) -> Self {
        Self::EmptySet { field }
    }
}

/// No registered route matched the request.
///
/// Carries the request key so callers can log or report it. The router does
/// not build a transport response; [`NotFound::status_code`] gives adapters
/// the status to use.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no route matches {method} {path} (content-type: {content_type})")]
pub struct NotFound {
    /// Request method token as received.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Request content-type, `*` when absent.
    pub content_type: String,
}

impl NotFound {
    /// Create a not-found outcome for the given request key.
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            content_type: content_type.into(),
        }
    }

    /// HTTP status an adapter should answer with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_route_names_triple() {
        let err = ConfigurationError::duplicate(HttpMethod::Get, "/a", "application/json");
        assert_eq!(
            err.to_string(),
            "route method: GET, path: /a, content-type: application/json already exists"
        );
    }

    #[test]
    fn test_empty_set_names_field() {
        let err = ConfigurationError::empty(DeclarationField::ContentType);
        assert!(err.to_string().contains("content-type"));
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ConfigurationError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.to_string().contains("`(`"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_not_found_status() {
        let err = NotFound::new("DELETE", "/nonexistent", "*");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("DELETE /nonexistent"));
    }
}
