//! Path and content-type matchers.
//!
//! A [`Matcher`] is either a literal string, looked up by exact key in the
//! route indexes, or a compiled regular expression, evaluated against the
//! whole request value. The literal/pattern split decides which of the four
//! indexes a route lands in.

use std::fmt;

use regex::Regex;

use crate::error::ConfigurationError;

/// Content-type token used when a declaration or request carries none.
///
/// It is an ordinary literal: routes registered without a content-type are
/// stored under it, and lookups fall back to it.
pub const WILDCARD_CONTENT_TYPE: &str = "*";

/// The content-type a request is looked up under: absent or empty becomes `*`.
pub(crate) fn content_type_or_wildcard(content_type: Option<&str>) -> &str {
    content_type
        .filter(|ct| !ct.is_empty())
        .unwrap_or(WILDCARD_CONTENT_TYPE)
}

/// A literal string or a regular expression.
///
/// Patterns are tested with [`Regex::is_match`] against the full path or the
/// full content-type value. Anchoring is up to the pattern: `json$` matches
/// `application/json`, `^/users$` matches only `/users`.
///
/// # Example
///
/// ```rust
/// use switchyard_router::Matcher;
///
/// let literal = Matcher::from("/users");
/// assert!(literal.matches("/users"));
/// assert!(!literal.matches("/users/1"));
///
/// let pattern = Matcher::pattern(r"^/users/\d+$").unwrap();
/// assert!(pattern.matches("/users/42"));
/// assert!(!pattern.matches("/users/me"));
/// ```
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact string.
    Literal(String),
    /// Compiled regular expression.
    Pattern(Regex),
}

impl Matcher {
    /// Creates a literal matcher.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Compiles a pattern matcher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidPattern`] if the regex does not compile.
    pub fn pattern(pattern: &str) -> Result<Self, ConfigurationError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|source| ConfigurationError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// The wildcard content-type literal.
    #[must_use]
    pub fn wildcard() -> Self {
        Self::Literal(WILDCARD_CONTENT_TYPE.to_string())
    }

    /// Returns true for [`Matcher::Literal`].
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Returns the literal text, if any.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Pattern(_) => None,
        }
    }

    /// Tests a request value against this matcher.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == value,
            Self::Pattern(regex) => regex.is_match(value),
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for Matcher {}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.write_str(value),
            Self::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

impl From<&str> for Matcher {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Matcher {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<Regex> for Matcher {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}
