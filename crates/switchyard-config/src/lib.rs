//! Typed configuration and route manifests for Switchyard.
//!
//! This crate loads a [`SwitchyardConfig`] with:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! The configuration carries the route manifest. [`SwitchyardConfig::route_table`]
//! compiles it into a `switchyard_router::RouteTable<String>` whose handlers are
//! handler names.
//!
//! # Example
//!
//! ```no_run
//! use switchyard_config::ConfigLoader;
//!
//! # fn main() -> Result<(), switchyard_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("routes.toml")?
//!     .with_env_prefix("SWITCHYARD")
//!     .load()?;
//!
//! let table = config.route_table()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [router]
//! content_type_header = "content-type"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//!
//! [[routes]]
//! method = ["GET", "HEAD"]
//! path = ["/documents", { pattern = '^/documents/\d+$' }]
//! handler = "getDocument"
//!
//! [[routes]]
//! method = "POST"
//! path = "/documents"
//! content_type = ["application/json", { pattern = "^text/" }]
//! handler = "createDocument"
//!
//! [[routes]]
//! method = "ANY"
//! path = "/health"
//! handler = "health"
//! ```
//!
//! # Environment Variable Overrides
//!
//! The `[router]` and `[logging]` values can be overridden with
//! `PREFIX__SECTION__KEY` variables:
//!
//! - `SWITCHYARD__ROUTER__CONTENT_TYPE_HEADER=x-content-type`
//! - `SWITCHYARD__LOGGING__LEVEL=switchyard_router=trace,info`
//! - `SWITCHYARD__LOGGING__FORMAT=pretty`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod routes;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use routes::{MatcherSpec, OneOrMany, PatternSpec, RouteSpec};
pub use schema::*;
