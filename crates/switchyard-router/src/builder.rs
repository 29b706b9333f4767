//! Route table construction.

use tracing::debug;

use crate::declaration::RouteDeclaration;
use crate::error::ConfigurationError;
use crate::table::RouteTable;

/// Collects declarations and builds an immutable [`RouteTable`].
///
/// Declarations are expanded and indexed in the order they were added, which
/// makes registration order part of the resolution contract for pattern
/// routes. The builder is consumed by [`RouteTableBuilder::build`].
///
/// # Example
///
/// ```rust
/// use switchyard_router::{HttpMethod, Matcher, RouteDeclaration, RouteTableBuilder};
///
/// let table = RouteTableBuilder::new()
///     .route(RouteDeclaration::new(HttpMethod::Get, "/users", "listUsers"))
///     .route(RouteDeclaration::new(
///         HttpMethod::Get,
///         Matcher::pattern(r"^/users/[^/]+$").unwrap(),
///         "getUser",
///     ))
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RouteTableBuilder<H> {
    declarations: Vec<RouteDeclaration<H>>,
}

impl<H> Default for RouteTableBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouteTableBuilder<H> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Adds one declaration.
    #[must_use]
    pub fn route(mut self, declaration: RouteDeclaration<H>) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Adds several declarations, keeping their order.
    #[must_use]
    pub fn routes<I>(mut self, declarations: I) -> Self
    where
        I: IntoIterator<Item = RouteDeclaration<H>>,
    {
        self.declarations.extend(declarations);
        self
    }

    /// Number of declarations added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl<H: Clone> RouteTableBuilder<H> {
    /// Expands, classifies and indexes every declaration.
    ///
    /// Fails on the first malformed declaration or duplicate literal route;
    /// no table is returned in that case.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] describing the first offending declaration.
    pub fn build(self) -> Result<RouteTable<H>, ConfigurationError> {
        let mut table = RouteTable::default();
        let declarations = self.declarations.len();

        for declaration in self.declarations {
            for route in declaration.expand()? {
                table.insert(route)?;
            }
        }

        let stats = table.stats();
        debug!(
            declarations,
            routes = table.len(),
            exact = stats.exact,
            literal_path = stats.literal_path,
            literal_content_type = stats.literal_content_type,
            pattern = stats.pattern,
            "route table built"
        );

        Ok(table)
    }
}
