//! Structured logging for Switchyard services.
//!
//! Library crates in this workspace only emit `tracing` events. Binaries and
//! service entry points call [`init_logging`] once at startup to decide where
//! those events go and how they are formatted:
//!
//! - **JSON** lines for production log pipelines
//! - **Pretty** multi-line output for local development
//!
//! # Example
//!
//! ```rust,ignore
//! use switchyard_telemetry::{init_logging, LogConfig};
//!
//! fn main() -> Result<(), switchyard_telemetry::TelemetryError> {
//!     init_logging(&LogConfig::development())?;
//!
//!     tracing::info!("router starting");
//!     Ok(())
//! }
//! ```
//!
//! # Standard fields
//!
//! | Field | Emitted by |
//! |-------|------------|
//! | `http.method`, `http.path`, `http.content_type` | router resolve events |
//! | `route.stage` | router, on a match; recorded on the CLI `resolve` span |
//! | `handler` | [`log_route_matched!`]; recorded on the CLI `resolve` span |
//! | `http.status_code` | [`log_route_not_found!`]; recorded on the CLI `resolve` span |

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
