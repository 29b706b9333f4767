//! Route declarations.
//!
//! A [`RouteDeclaration`] is what callers register: one handler with one or
//! more methods, paths and content-types. At build time it expands into the
//! cartesian product of [`Route`] entries.

use smallvec::SmallVec;

use crate::error::{ConfigurationError, DeclarationField};
use crate::matcher::Matcher;
use crate::method::MethodSet;
use crate::route::Route;

/// Ordered matcher collection, inline for the common single-value case.
pub type Matchers = SmallVec<[Matcher; 1]>;

/// A handler registration before expansion.
///
/// # Example
///
/// ```rust
/// use switchyard_router::{HttpMethod, Matcher, MethodSet, RouteDeclaration};
///
/// let decl = RouteDeclaration::new([HttpMethod::Get, HttpMethod::Head], "/users", "listUsers")
///     .path(Matcher::pattern(r"^/users/\d+$").unwrap())
///     .content_type("application/json");
///
/// // 2 methods x 2 paths x 1 content-type
/// assert_eq!(decl.expanded_len(), 4);
///
/// let any = RouteDeclaration::new(MethodSet::Any, "/health", "health");
/// assert_eq!(any.expanded_len(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct RouteDeclaration<H> {
    methods: MethodSet,
    paths: Matchers,
    content_types: Option<Matchers>,
    handler: H,
}

impl<H> RouteDeclaration<H> {
    /// Creates a declaration with one path and no content-type restriction.
    pub fn new(methods: impl Into<MethodSet>, path: impl Into<Matcher>, handler: H) -> Self {
        Self {
            methods: methods.into(),
            paths: smallvec::smallvec![path.into()],
            content_types: None,
            handler,
        }
    }

    /// Creates a declaration from complete collections.
    ///
    /// `content_types` of `None` means "any content-type"; `Some` of an empty
    /// collection is rejected at build time, as are empty method and path sets.
    pub fn from_parts<P, C>(
        methods: impl Into<MethodSet>,
        paths: P,
        content_types: Option<C>,
        handler: H,
    ) -> Self
    where
        P: IntoIterator<Item = Matcher>,
        C: IntoIterator<Item = Matcher>,
    {
        Self {
            methods: methods.into(),
            paths: paths.into_iter().collect(),
            content_types: content_types.map(|c| c.into_iter().collect()),
            handler,
        }
    }

    /// Replaces the method set.
    #[must_use]
    pub fn methods(mut self, methods: impl Into<MethodSet>) -> Self {
        self.methods = methods.into();
        self
    }

    /// Adds a path matcher.
    #[must_use]
    pub fn path(mut self, path: impl Into<Matcher>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Replaces the path matchers.
    #[must_use]
    pub fn paths<I, M>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Matcher>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a content-type matcher.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<Matcher>) -> Self {
        self.content_types
            .get_or_insert_with(SmallVec::new)
            .push(content_type.into());
        self
    }

    /// Replaces the content-type matchers.
    ///
    /// An empty collection is a configuration error at build time; to accept
    /// any content-type, leave the field unset instead.
    #[must_use]
    pub fn content_types<I, M>(mut self, content_types: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Matcher>,
    {
        self.content_types = Some(content_types.into_iter().map(Into::into).collect());
        self
    }

    /// The declared methods.
    #[must_use]
    pub fn method_set(&self) -> &MethodSet {
        &self.methods
    }

    /// The declared path matchers.
    #[must_use]
    pub fn path_matchers(&self) -> &[Matcher] {
        &self.paths
    }

    /// The declared content-type matchers, `None` when unrestricted.
    #[must_use]
    pub fn content_type_matchers(&self) -> Option<&[Matcher]> {
        self.content_types.as_deref()
    }

    /// The handler.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Number of entries this declaration expands to.
    #[must_use]
    pub fn expanded_len(&self) -> usize {
        let content_types = self.content_types.as_ref().map_or(1, SmallVec::len);
        self.methods.as_slice().len() * self.paths.len() * content_types
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.methods.is_empty() {
            return Err(ConfigurationError::empty(DeclarationField::Method));
        }
        if self.paths.is_empty() {
            return Err(ConfigurationError::empty(DeclarationField::Path));
        }
        if self.content_types.as_ref().is_some_and(SmallVec::is_empty) {
            return Err(ConfigurationError::empty(DeclarationField::ContentType));
        }
        Ok(())
    }
}

impl<H: Clone> RouteDeclaration<H> {
    /// Expands into resolved entries: method outermost, then path, then content-type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptySet`] if any collection is empty.
    pub fn expand(self) -> Result<Vec<Route<H>>, ConfigurationError> {
        self.validate()?;

        let content_types = self
            .content_types
            .unwrap_or_else(|| smallvec::smallvec![Matcher::wildcard()]);

        let mut routes = Vec::with_capacity(
            self.methods.as_slice().len() * self.paths.len() * content_types.len(),
        );
        for &method in self.methods.as_slice() {
            for path in &self.paths {
                for content_type in &content_types {
                    routes.push(Route::new(
                        method,
                        path.clone(),
                        content_type.clone(),
                        self.handler.clone(),
                    ));
                }
            }
        }
        Ok(routes)
    }
}
