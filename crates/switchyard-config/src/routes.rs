//! Route manifest entries.
//!
//! A manifest is a list of `[[routes]]` tables. Each entry names a handler and
//! the methods, paths and content-types it serves:
//!
//! ```toml
//! [[routes]]
//! method = ["GET", "HEAD"]
//! path = ["/documents", { pattern = '^/documents/\d+$' }]
//! content_type = "application/json"
//! handler = "getDocument"
//! ```
//!
//! A single value and a list are interchangeable. A string is a literal, a
//! `{ pattern = "..." }` table is a regular expression, and the method token
//! `ANY` stands for every method.

use serde::{Deserialize, Serialize};
use switchyard_router::{ConfigurationError, Matcher, MethodSet, RouteDeclaration};

/// Either a single value or a list of values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single value.
    One(T),
    /// A list of values, possibly empty.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Returns the values as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        Self::One(value)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values)
    }
}

/// A `{ pattern = "..." }` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PatternSpec {
    /// Regular expression source.
    pub pattern: String,
}

/// A path or content-type matcher as written in a manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MatcherSpec {
    /// Matched by byte equality.
    Literal(String),
    /// Matched by regular expression.
    Pattern(PatternSpec),
}

impl MatcherSpec {
    /// Shorthand for a pattern matcher.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(PatternSpec {
            pattern: pattern.into(),
        })
    }

    /// Compiles into a router [`Matcher`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidPattern`] if the regex does not compile.
    pub fn compile(&self) -> Result<Matcher, ConfigurationError> {
        match self {
            Self::Literal(value) => Ok(Matcher::literal(value.clone())),
            Self::Pattern(spec) => Matcher::pattern(&spec.pattern),
        }
    }
}

impl From<&str> for MatcherSpec {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

/// One `[[routes]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouteSpec {
    /// Method token, `ANY`, or a list of tokens.
    pub method: OneOrMany<String>,

    /// Path matcher or list of matchers.
    pub path: OneOrMany<MatcherSpec>,

    /// Content-type matcher or list of matchers. Omitted means any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<OneOrMany<MatcherSpec>>,

    /// Handler name the route resolves to.
    pub handler: String,
}

impl RouteSpec {
    /// Creates an entry with one method, one literal path and no content-type.
    pub fn new(method: &str, path: &str, handler: &str) -> Self {
        Self {
            method: OneOrMany::One(method.to_string()),
            path: OneOrMany::One(MatcherSpec::from(path)),
            content_type: None,
            handler: handler.to_string(),
        }
    }

    /// Resolves the method tokens. `ANY` anywhere in the list widens the set to
    /// every method.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownMethod`] for tokens outside the enumeration.
    pub fn method_set(&self) -> Result<MethodSet, ConfigurationError> {
        let mut methods = Vec::with_capacity(self.method.as_slice().len());
        for token in self.method.as_slice() {
            match MethodSet::parse_token(token)? {
                MethodSet::Any => return Ok(MethodSet::Any),
                MethodSet::Only(parsed) => methods.extend(parsed),
            }
        }
        Ok(MethodSet::from(methods))
    }

    /// Compiles this entry into a declaration whose handler is the handler name.
    ///
    /// Empty lists are kept as-is so the table builder reports them.
    ///
    /// # Errors
    ///
    /// Returns the first unknown method or invalid pattern.
    pub fn to_declaration(&self) -> Result<RouteDeclaration<String>, ConfigurationError> {
        let paths = compile_all(self.path.as_slice())?;
        let content_types = self
            .content_type
            .as_ref()
            .map(|specs| compile_all(specs.as_slice()))
            .transpose()?;

        Ok(RouteDeclaration::from_parts(
            self.method_set()?,
            paths,
            content_types,
            self.handler.clone(),
        ))
    }
}

fn compile_all(specs: &[MatcherSpec]) -> Result<Vec<Matcher>, ConfigurationError> {
    specs.iter().map(MatcherSpec::compile).collect()
}
