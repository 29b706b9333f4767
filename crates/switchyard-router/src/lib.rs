//! Request router for serverless HTTP entry points.
//!
//! This crate maps a request's method, path and content-type to exactly one
//! registered handler. Routes are declared up front, expanded and indexed
//! once, and then resolved concurrently from an immutable [`RouteTable`].
//!
//! # Features
//!
//! - **Four-way indexing**: literal/pattern path crossed with literal/pattern content-type
//! - **Deterministic precedence**: exact matches beat pattern matches, first
//!   registration wins among patterns
//! - **Build-time validation**: duplicate literal routes and empty declarations fail before serving
//! - **Lock-free serving**: resolution is a pure read of the table
//!
//! # Example
//!
//! ```rust
//! use switchyard_router::{HttpMethod, Matcher, RouteDeclaration, RouteTable};
//!
//! let table = RouteTable::build(vec![
//!     RouteDeclaration::new(HttpMethod::Get, "/users", "listUsers"),
//!     RouteDeclaration::new(HttpMethod::Post, "/users", "createUser")
//!         .content_type("application/json"),
//!     RouteDeclaration::new(
//!         HttpMethod::Get,
//!         Matcher::pattern(r"^/users/[^/]+$").unwrap(),
//!         "getUser",
//!     ),
//! ])
//! .unwrap();
//!
//! let route = table.resolve(HttpMethod::Get, "/users/123", None).unwrap();
//! assert_eq!(*route.handler(), "getUser");
//!
//! let missing = table.resolve(HttpMethod::Post, "/users", Some("text/plain"));
//! assert!(missing.is_err());
//! ```
//!
//! # Resolution order
//!
//! ```text
//!   (method, path, content-type)
//!              │
//!   1. exact             path == literal, content-type == literal (or "*")
//!              │ miss
//!   2. literal path      path == literal, content-type =~ pattern
//!              │ miss
//!   3. literal ctype     path =~ pattern, content-type == literal (or "*")
//!              │ miss
//!   4. pattern           path =~ pattern, content-type =~ pattern
//!              │ miss
//!          NotFound
//! ```

mod builder;
mod declaration;
mod error;
mod matcher;
mod method;
mod request;
mod route;
mod table;

pub use builder::RouteTableBuilder;
pub use declaration::{Matchers, RouteDeclaration};
pub use error::{ConfigurationError, DeclarationField, NotFound};
pub use matcher::{Matcher, WILDCARD_CONTENT_TYPE};
pub use method::{HttpMethod, MethodSet};
pub use request::RouteKey;
pub use route::{IndexKind, Route};
pub use table::{IndexStats, RouteTable};
