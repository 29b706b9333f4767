//! The immutable route table and the resolution algorithm.
//!
//! A [`RouteTable`] owns every expanded [`Route`] in registration order and
//! four per-method indexes that point into that list:
//!
//! ```text
//!                      content-type literal        content-type pattern
//! path literal     exact:   path → ct → route   literal_path: path → [route]
//! path pattern     literal_content_type:         pattern:      [route]
//!                          ct → [route]
//! ```
//!
//! Resolution walks the indexes top-left to bottom-right and returns the
//! first hit. Inside the sequence indexes the earliest registration wins.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::builder::RouteTableBuilder;
use crate::declaration::RouteDeclaration;
use crate::error::{ConfigurationError, NotFound};
use crate::matcher::{content_type_or_wildcard, Matcher, WILDCARD_CONTENT_TYPE};
use crate::method::{HttpMethod, MethodMap};
use crate::route::{IndexKind, Route};

/// Position of a route in [`RouteTable::routes`].
type RouteId = usize;

/// Entry counts per index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Literal path, literal content-type.
    pub exact: usize,
    /// Literal path, pattern content-type.
    pub literal_path: usize,
    /// Pattern path, literal content-type.
    pub literal_content_type: usize,
    /// Pattern path, pattern content-type.
    pub pattern: usize,
}

impl IndexStats {
    /// Sum over all indexes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.exact + self.literal_path + self.literal_content_type + self.pattern
    }
}

/// Built, read-only route table.
///
/// `RouteTable` is `Send + Sync` whenever the handler type is, so one table
/// can serve concurrent requests without locking.
///
/// # Example
///
/// ```rust
/// use switchyard_router::{HttpMethod, RouteDeclaration, RouteTable};
///
/// let table = RouteTable::build(vec![
///     RouteDeclaration::new(HttpMethod::Get, "/a", "json")
///         .content_type("application/json"),
///     RouteDeclaration::new(HttpMethod::Get, "/a", "fallback"),
/// ])
/// .unwrap();
///
/// let json = table
///     .resolve(HttpMethod::Get, "/a", Some("application/json"))
///     .unwrap();
/// assert_eq!(*json.handler(), "json");
///
/// let other = table
///     .resolve(HttpMethod::Get, "/a", Some("text/plain"))
///     .unwrap();
/// assert_eq!(*other.handler(), "fallback");
///
/// assert!(table.resolve(HttpMethod::Delete, "/a", None).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
    exact: MethodMap<HashMap<String, HashMap<String, RouteId>>>,
    literal_path: MethodMap<HashMap<String, Vec<RouteId>>>,
    literal_content_type: MethodMap<HashMap<String, Vec<RouteId>>>,
    pattern: MethodMap<Vec<RouteId>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            exact: MethodMap::default(),
            literal_path: MethodMap::default(),
            literal_content_type: MethodMap::default(),
            pattern: MethodMap::default(),
        }
    }
}

impl<H: Clone> RouteTable<H> {
    /// Builds a table from declarations in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for duplicate literal routes or malformed declarations.
    pub fn build<I>(declarations: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = RouteDeclaration<H>>,
    {
        RouteTableBuilder::new().routes(declarations).build()
    }
}

impl<H> RouteTable<H> {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> RouteTableBuilder<H> {
        RouteTableBuilder::new()
    }

    /// Stores one expanded route in its index.
    ///
    /// Only the builder calls this, so a table is never observable half-built.
    pub(crate) fn insert(&mut self, route: Route<H>) -> Result<(), ConfigurationError> {
        let id = self.routes.len();
        let method = route.method();

        match (route.path(), route.content_type()) {
            (Matcher::Literal(path), Matcher::Literal(content_type)) => {
                let by_content_type = self.exact[method].entry(path.clone()).or_default();
                match by_content_type.entry(content_type.clone()) {
                    Entry::Occupied(_) => {
                        return Err(ConfigurationError::duplicate(method, path, content_type));
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(id);
                    }
                }
            }
            (Matcher::Literal(path), Matcher::Pattern(_)) => {
                self.literal_path[method]
                    .entry(path.clone())
                    .or_default()
                    .push(id);
            }
            (Matcher::Pattern(_), Matcher::Literal(content_type)) => {
                self.literal_content_type[method]
                    .entry(content_type.clone())
                    .or_default()
                    .push(id);
            }
            (Matcher::Pattern(_), Matcher::Pattern(_)) => {
                self.pattern[method].push(id);
            }
        }

        self.routes.push(route);
        Ok(())
    }

    /// Resolves a request to its route.
    ///
    /// A `content_type` of `None` or `Some("")` is looked up as the wildcard
    /// token `*`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] when no index yields a match.
    pub fn resolve(
        &self,
        method: HttpMethod,
        path: &str,
        content_type: Option<&str>,
    ) -> Result<&Route<H>, NotFound> {
        let content_type = content_type_or_wildcard(content_type);

        match self.find(method, path, content_type) {
            Some((stage, id)) => {
                trace!(
                    http.method = %method,
                    http.path = path,
                    http.content_type = content_type,
                    route.stage = stage.as_str(),
                    "route matched"
                );
                Ok(&self.routes[id])
            }
            None => {
                debug!(
                    http.method = %method,
                    http.path = path,
                    http.content_type = content_type,
                    "no route matched"
                );
                Err(NotFound::new(method.as_str(), path, content_type))
            }
        }
    }

    /// Resolves a request whose method is still a raw token.
    ///
    /// Tokens outside [`HttpMethod`] (including lower-case spellings) never match.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] when the token is unknown or nothing matches.
    pub fn resolve_str(
        &self,
        method: &str,
        path: &str,
        content_type: Option<&str>,
    ) -> Result<&Route<H>, NotFound> {
        match method.parse::<HttpMethod>() {
            Ok(method) => self.resolve(method, path, content_type),
            Err(_) => {
                debug!(http.method = method, http.path = path, "unsupported method");
                Err(NotFound::new(
                    method,
                    path,
                    content_type_or_wildcard(content_type),
                ))
            }
        }
    }

    fn find(
        &self,
        method: HttpMethod,
        path: &str,
        content_type: &str,
    ) -> Option<(IndexKind, RouteId)> {
        self.find_exact(method, path, content_type)
            .map(|id| (IndexKind::Exact, id))
            .or_else(|| {
                self.find_literal_path(method, path, content_type)
                    .map(|id| (IndexKind::LiteralPath, id))
            })
            .or_else(|| {
                self.find_literal_content_type(method, path, content_type)
                    .map(|id| (IndexKind::LiteralContentType, id))
            })
            .or_else(|| {
                self.find_pattern(method, path, content_type)
                    .map(|id| (IndexKind::Pattern, id))
            })
    }

    fn find_exact(&self, method: HttpMethod, path: &str, content_type: &str) -> Option<RouteId> {
        let by_content_type = self.exact[method].get(path)?;
        by_content_type
            .get(content_type)
            .or_else(|| by_content_type.get(WILDCARD_CONTENT_TYPE))
            .copied()
    }

    fn find_literal_path(
        &self,
        method: HttpMethod,
        path: &str,
        content_type: &str,
    ) -> Option<RouteId> {
        self.literal_path[method]
            .get(path)?
            .iter()
            .copied()
            .find(|&id| self.routes[id].content_type().matches(content_type))
    }

    fn find_literal_content_type(
        &self,
        method: HttpMethod,
        path: &str,
        content_type: &str,
    ) -> Option<RouteId> {
        let index = &self.literal_content_type[method];
        index
            .get(content_type)
            .or_else(|| index.get(WILDCARD_CONTENT_TYPE))?
            .iter()
            .copied()
            .find(|&id| self.routes[id].path().matches(path))
    }

    fn find_pattern(&self, method: HttpMethod, path: &str, content_type: &str) -> Option<RouteId> {
        self.pattern[method].iter().copied().find(|&id| {
            let route = &self.routes[id];
            route.path().matches(path) && route.content_type().matches(content_type)
        })
    }

    /// Number of expanded routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All routes in registration (expansion) order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }

    /// Entry counts per index.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            exact: self
                .exact
                .values()
                .flat_map(HashMap::values)
                .map(HashMap::len)
                .sum(),
            literal_path: self
                .literal_path
                .values()
                .flat_map(HashMap::values)
                .map(Vec::len)
                .sum(),
            literal_content_type: self
                .literal_content_type
                .values()
                .flat_map(HashMap::values)
                .map(Vec::len)
                .sum(),
            pattern: self.pattern.values().map(Vec::len).sum(),
        }
    }
}
