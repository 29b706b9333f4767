//! Switchyard command-line tool.
//!
//! The `switchyard` binary loads a route manifest the same way a service
//! would, then reports on it:
//!
//! - `check` builds the table and prints per-index counts
//! - `routes` lists every expanded route with the index it landed in
//! - `resolve` runs one request through the table and prints the handler name
//!
//! Command logic lives here so it can be tested against an in-memory writer;
//! `main.rs` only parses arguments, installs logging and maps the outcome to an
//! exit code.

#![warn(missing_docs)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use http::{Method, Request};
use switchyard_config::{ConfigLoader, SwitchyardConfig};
use switchyard_router::{RouteKey, RouteTable};
use switchyard_telemetry::fields;
use tracing::field::Empty;
use tracing::{info, info_span};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "switchyard", version)]
#[command(about = "Check and query Switchyard route manifests", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (TOML or JSON).
    #[arg(short, long, global = true, default_value = "switchyard.toml")]
    pub config: PathBuf,

    /// Prefix for `PREFIX__SECTION__KEY` environment overrides.
    #[arg(long, global = true, default_value = "SWITCHYARD")]
    pub env_prefix: String,

    /// Load a `.env` file from the working directory before reading overrides.
    #[arg(long, global = true)]
    pub dotenv: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the route table and print per-index counts
    Check,
    /// List every expanded route with its index
    Routes,
    /// Resolve one request and print the handler name
    Resolve {
        /// Request method token, case-sensitive (e.g. GET)
        method: String,
        /// Request path, optionally with a query string
        path: String,
        /// Content-type header value
        #[arg(long)]
        content_type: Option<String>,
    },
}

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked.
    Success,
    /// `resolve` found no route.
    NoMatch,
}

impl Outcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::NoMatch => 2,
        }
    }
}

/// Loads and validates the configuration named on the command line.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, an environment
/// override does not parse, or the manifest does not build.
pub fn load_config(cli: &Cli) -> Result<SwitchyardConfig> {
    let mut loader = ConfigLoader::new().with_defaults();
    if cli.dotenv {
        loader = loader.with_dotenv()?;
    }
    loader
        .with_file(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?
        .with_env_prefix(&cli.env_prefix)
        .load()
        .with_context(|| format!("validating {}", cli.config.display()))
}

/// Runs a subcommand against a loaded configuration, writing results to `out`.
///
/// # Errors
///
/// Returns an error if the table does not build, the request given to
/// `resolve` is not a valid HTTP request, or writing to `out` fails.
pub fn execute(
    command: &Command,
    config: &SwitchyardConfig,
    out: &mut impl Write,
) -> Result<Outcome> {
    let table = config.route_table().context("building route table")?;

    match command {
        Command::Check => check(config, &table, out),
        Command::Routes => list_routes(&table, out),
        Command::Resolve {
            method,
            path,
            content_type,
        } => resolve(config, &table, method, path, content_type.as_deref(), out),
    }
}

fn check(
    config: &SwitchyardConfig,
    table: &RouteTable<String>,
    out: &mut impl Write,
) -> Result<Outcome> {
    let stats = table.stats();
    info!(
        declarations = config.routes.len(),
        routes = stats.total(),
        "route table ok"
    );

    writeln!(
        out,
        "ok: {} declarations, {} routes",
        config.routes.len(),
        stats.total()
    )?;
    writeln!(out, "  exact                 {}", stats.exact)?;
    writeln!(out, "  literal-path          {}", stats.literal_path)?;
    writeln!(out, "  literal-content-type  {}", stats.literal_content_type)?;
    writeln!(out, "  pattern               {}", stats.pattern)?;
    Ok(Outcome::Success)
}

fn list_routes(table: &RouteTable<String>, out: &mut impl Write) -> Result<Outcome> {
    for route in table.routes() {
        writeln!(out, "{:<22}{} -> {}", route.index_kind(), route, route.handler())?;
    }
    Ok(Outcome::Success)
}

fn resolve(
    config: &SwitchyardConfig,
    table: &RouteTable<String>,
    method: &str,
    path: &str,
    content_type: Option<&str>,
    out: &mut impl Write,
) -> Result<Outcome> {
    let header = config.content_type_header()?;
    let method = Method::from_bytes(method.as_bytes())
        .with_context(|| format!("invalid method token: {method}"))?;

    let mut builder = Request::builder().method(method).uri(path);
    if let Some(content_type) = content_type {
        builder = builder.header(&header, content_type);
    }
    let request = builder
        .body(())
        .with_context(|| format!("invalid request: {path}"))?;

    let key = RouteKey::from_request_with_header(&request, &header);
    let span = info_span!(
        "resolve",
        http.method = %key.method,
        http.path = key.path,
        route.stage = Empty,
        handler = Empty,
        http.status_code = Empty,
    );
    let _enter = span.enter();

    match table.resolve_key(&key) {
        Ok(route) => {
            span.record(fields::ROUTE_STAGE, route.index_kind().as_str());
            span.record(fields::HANDLER, route.handler().as_str());
            switchyard_telemetry::log_route_matched!(
                key.method,
                key.path,
                key.content_type_or_wildcard(),
                route.handler()
            );
            writeln!(out, "{}", route.handler())?;
            Ok(Outcome::Success)
        }
        Err(not_found) => {
            span.record(fields::HTTP_STATUS, not_found.status_code().as_u16());
            switchyard_telemetry::log_route_not_found!(not_found);
            writeln!(out, "{} not found", not_found.status_code().as_u16())?;
            Ok(Outcome::NoMatch)
        }
    }
}
