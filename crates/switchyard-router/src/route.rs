//! Resolved route entries.

use std::fmt;

use crate::matcher::Matcher;
use crate::method::HttpMethod;

/// Which of the four route indexes an entry lives in.
///
/// The variants are listed in resolution order: an [`IndexKind::Exact`] hit
/// always wins over the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Literal path, literal content-type.
    Exact,
    /// Literal path, pattern content-type.
    LiteralPath,
    /// Pattern path, literal content-type.
    LiteralContentType,
    /// Pattern path, pattern content-type.
    Pattern,
}

impl IndexKind {
    /// Classifies a (path, content-type) matcher pair.
    #[must_use]
    pub fn classify(path: &Matcher, content_type: &Matcher) -> Self {
        match (path, content_type) {
            (Matcher::Literal(_), Matcher::Literal(_)) => Self::Exact,
            (Matcher::Literal(_), Matcher::Pattern(_)) => Self::LiteralPath,
            (Matcher::Pattern(_), Matcher::Literal(_)) => Self::LiteralContentType,
            (Matcher::Pattern(_), Matcher::Pattern(_)) => Self::Pattern,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::LiteralPath => "literal_path",
            Self::LiteralContentType => "literal_content_type",
            Self::Pattern => "pattern",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One expanded route: a single method, path matcher and content-type matcher.
#[derive(Debug, Clone)]
pub struct Route<H> {
    method: HttpMethod,
    path: Matcher,
    content_type: Matcher,
    handler: H,
}

impl<H> Route<H> {
    pub(crate) fn new(
        method: HttpMethod,
        path: Matcher,
        content_type: Matcher,
        handler: H,
    ) -> Self {
        Self {
            method,
            path,
            content_type,
            handler,
        }
    }

    /// The route's method.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The route's path matcher.
    #[must_use]
    pub fn path(&self) -> &Matcher {
        &self.path
    }

    /// The route's content-type matcher (`*` when the declaration had none).
    #[must_use]
    pub fn content_type(&self) -> &Matcher {
        &self.content_type
    }

    /// The handler registered for this route.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The index this route is stored in.
    #[must_use]
    pub fn index_kind(&self) -> IndexKind {
        IndexKind::classify(&self.path, &self.content_type)
    }
}

impl<H> fmt::Display for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.path, self.content_type)
    }
}
