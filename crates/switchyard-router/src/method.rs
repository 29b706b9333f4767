//! HTTP method enumeration and per-method storage.
//!
//! This module provides [`HttpMethod`], the closed set of verbs the router
//! dispatches on, [`MethodSet`] for declaring which verbs a route accepts,
//! and the crate-internal [`MethodMap`] used to key every route index by
//! method without string lookups.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use http::Method;
use smallvec::SmallVec;

use crate::error::ConfigurationError;

/// The HTTP verbs a route can be registered for.
///
/// Tokens are matched case-sensitively: `"GET"` parses, `"get"` does not.
///
/// # Example
///
/// ```rust
/// use switchyard_router::HttpMethod;
///
/// let method: HttpMethod = "POST".parse().unwrap();
/// assert_eq!(method, HttpMethod::Post);
/// assert!("post".parse::<HttpMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    /// GET
    Get,
    /// HEAD
    Head,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// OPTIONS
    Options,
    /// TRACE
    Trace,
    /// CONNECT
    Connect,
}

impl HttpMethod {
    /// Number of variants.
    pub const COUNT: usize = 9;

    /// Every variant, in index order.
    pub const ALL: [HttpMethod; Self::COUNT] = [
        Self::Get,
        Self::Head,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Patch,
        Self::Options,
        Self::Trace,
        Self::Connect,
    ];

    /// Returns the dense index of this method (`0..COUNT`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the canonical upper-case token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Connect => "CONNECT",
        }
    }

    /// Converts from an [`http::Method`].
    ///
    /// Extension methods have no counterpart and return `None`.
    #[must_use]
    pub fn from_http(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Self::Get),
            Method::HEAD => Some(Self::Head),
            Method::POST => Some(Self::Post),
            Method::PUT => Some(Self::Put),
            Method::DELETE => Some(Self::Delete),
            Method::PATCH => Some(Self::Patch),
            Method::OPTIONS => Some(Self::Options),
            Method::TRACE => Some(Self::Trace),
            Method::CONNECT => Some(Self::Connect),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownMethod(s.to_string()))
    }
}

static EVERY_METHOD: [HttpMethod; HttpMethod::COUNT] = HttpMethod::ALL;

/// The set of methods a declaration applies to.
///
/// `Any` expands to every [`HttpMethod`] at build time. `Only` keeps the
/// caller's order; an empty `Only` is rejected when the table is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodSet {
    /// Every method.
    Any,
    /// An explicit, ordered list of methods.
    Only(SmallVec<[HttpMethod; 2]>),
}

impl MethodSet {
    /// Token accepted by [`MethodSet::parse_token`] for [`MethodSet::Any`].
    pub const ANY_TOKEN: &'static str = "ANY";

    /// Returns the methods this set expands to, in order.
    #[must_use]
    pub fn as_slice(&self) -> &[HttpMethod] {
        match self {
            Self::Any => EVERY_METHOD.as_slice(),
            Self::Only(methods) => methods.as_slice(),
        }
    }

    /// Returns true if the set expands to nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Parses a single token, treating `ANY` as the wildcard.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownMethod`] for tokens outside the enumeration.
    pub fn parse_token(token: &str) -> Result<Self, ConfigurationError> {
        if token == Self::ANY_TOKEN {
            Ok(Self::Any)
        } else {
            token.parse::<HttpMethod>().map(Self::from)
        }
    }
}

impl From<HttpMethod> for MethodSet {
    fn from(method: HttpMethod) -> Self {
        Self::Only(smallvec::smallvec![method])
    }
}

impl<const N: usize> From<[HttpMethod; N]> for MethodSet {
    fn from(methods: [HttpMethod; N]) -> Self {
        methods.into_iter().collect()
    }
}

impl From<Vec<HttpMethod>> for MethodSet {
    fn from(methods: Vec<HttpMethod>) -> Self {
        Self::Only(SmallVec::from_vec(methods))
    }
}

impl FromIterator<HttpMethod> for MethodSet {
    fn from_iter<I: IntoIterator<Item = HttpMethod>>(iter: I) -> Self {
        Self::Only(iter.into_iter().collect())
    }
}

/// Fixed-size storage with one slot per [`HttpMethod`].
#[derive(Debug, Clone)]
pub(crate) struct MethodMap<T> {
    slots: [T; HttpMethod::COUNT],
}

impl<T: Default> Default for MethodMap<T> {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| T::default()),
        }
    }
}

impl<T> MethodMap<T> {
    /// Iterates over all slots in method index order.
    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }
}

impl<T> Index<HttpMethod> for MethodMap<T> {
    type Output = T;

    fn index(&self, method: HttpMethod) -> &T {
        &self.slots[method.index()]
    }
}

impl<T> IndexMut<HttpMethod> for MethodMap<T> {
    fn index_mut(&mut self, method: HttpMethod) -> &mut T {
        &mut self.slots[method.index()]
    }
}
