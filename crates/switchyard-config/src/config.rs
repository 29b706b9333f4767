//! Main configuration types.
//!
//! This module provides the top-level [`SwitchyardConfig`] struct and its builder.

use http::HeaderName;
use serde::{Deserialize, Serialize};
use switchyard_router::{RouteDeclaration, RouteTable};

use crate::{ConfigError, LoggingConfig, RouteSpec, RouterConfig};

/// Complete Switchyard configuration.
///
/// This is the root configuration type: the `[router]` and `[logging]`
/// sections plus the route manifest. Use [`ConfigLoader`](crate::ConfigLoader)
/// to load it from files and environment variables.
///
/// # Example
///
/// ```
/// use switchyard_config::{RouteSpec, SwitchyardConfig};
///
/// let config = SwitchyardConfig::builder()
///     .route(RouteSpec::new("GET", "/health", "health"))
///     .build_validated()
///     .unwrap();
///
/// let table = config.route_table().unwrap();
/// let route = table.resolve_str("GET", "/health", None).unwrap();
/// assert_eq!(route.handler(), "health");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct SwitchyardConfig {
    /// Router configuration.
    #[serde(default)]
    pub router: RouterConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Route manifest, in declaration order.
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

impl SwitchyardConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> SwitchyardConfigBuilder {
        SwitchyardConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - The content-type header is not a valid header name
    /// - The log level is empty or not a valid filter directive
    /// - A route has an empty handler name
    ///
    /// Returns `ConfigError::Route` if the manifest does not build into a table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.content_type_header()?;

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_value("logging.level", "must not be empty"));
        }
        switchyard_telemetry::create_env_filter(&self.logging.level)
            .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;

        if let Some(index) = self.routes.iter().position(|r| r.handler.is_empty()) {
            return Err(ConfigError::invalid_value(
                format!("routes[{index}].handler"),
                "must not be empty",
            ));
        }

        self.route_table()?;
        Ok(())
    }

    /// The configured content-type header as an `http` header name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the name is not a valid header name.
    pub fn content_type_header(&self) -> Result<HeaderName, ConfigError> {
        HeaderName::from_bytes(self.router.content_type_header.as_bytes()).map_err(|_| {
            ConfigError::invalid_value(
                "router.content_type_header",
                format!("invalid header name: {}", self.router.content_type_header),
            )
        })
    }

    /// Compiles the manifest into declarations, in order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Route` for the first unknown method or invalid pattern.
    pub fn declarations(&self) -> Result<Vec<RouteDeclaration<String>>, ConfigError> {
        self.routes
            .iter()
            .map(|spec| spec.to_declaration().map_err(ConfigError::from))
            .collect()
    }

    /// Builds the route table, resolving to handler names.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Route` if a route does not compile, declares an
    /// empty list, or duplicates another route.
    pub fn route_table(&self) -> Result<RouteTable<String>, ConfigError> {
        Ok(RouteTable::build(self.declarations()?)?)
    }

    /// Create a development configuration preset.
    ///
    /// Pretty, colored, debug-level logs with source locations.
    ///
    /// # Example
    ///
    /// ```
    /// use switchyard_config::SwitchyardConfig;
    ///
    /// let config = SwitchyardConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = crate::LogFormat::Pretty;
        config.logging.ansi_enabled = true;
        config.logging.include_location = true;
        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON logs at info level, no colors.
    ///
    /// # Example
    ///
    /// ```
    /// use switchyard_config::SwitchyardConfig;
    ///
    /// let config = SwitchyardConfig::production();
    /// assert_eq!(config.logging.format, switchyard_config::LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.logging.level = "info".to_string();
        config.logging.format = crate::LogFormat::Json;
        config.logging.ansi_enabled = false;
        config
    }
}

/// Builder for [`SwitchyardConfig`].
#[derive(Debug, Default)]
pub struct SwitchyardConfigBuilder {
    router: Option<RouterConfig>,
    logging: Option<LoggingConfig>,
    routes: Vec<RouteSpec>,
}

impl SwitchyardConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the router configuration.
    #[must_use]
    pub fn router(mut self, router: RouterConfig) -> Self {
        self.router = Some(router);
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Append a route entry.
    #[must_use]
    pub fn route(mut self, route: RouteSpec) -> Self {
        self.routes.push(route);
        self
    }

    /// Append several route entries.
    #[must_use]
    pub fn routes(mut self, routes: impl IntoIterator<Item = RouteSpec>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> SwitchyardConfig {
        SwitchyardConfig {
            router: self.router.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
            routes: self.routes,
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<SwitchyardConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogFormat, MatcherSpec, OneOrMany};
    use switchyard_router::{ConfigurationError, HttpMethod};

    #[test]
    fn test_default_config() {
        let config = SwitchyardConfig::default();
        assert_eq!(config.router.content_type_header, "content-type");
        assert_eq!(config.logging.level, "info");
        assert!(config.routes.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_sections() {
        let config = SwitchyardConfig::builder()
            .router(RouterConfig {
                content_type_header: "x-content-type".to_string(),
            })
            .logging(LoggingConfig {
                format: LogFormat::Pretty,
                ..Default::default()
            })
            .route(RouteSpec::new("GET", "/a", "a"))
            .routes([RouteSpec::new("GET", "/b", "b")])
            .build();

        assert_eq!(config.router.content_type_header, "x-content-type");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.routes.len(), 2);
    }

    #[test]
    fn test_validate_invalid_header() {
        let result = SwitchyardConfig::builder()
            .router(RouterConfig {
                content_type_header: "content type".to_string(),
            })
            .build_validated();

        assert!(result.unwrap_err().to_string().contains("content_type_header"));
    }

    #[test]
    fn test_content_type_header_lowercased() {
        let config = SwitchyardConfig::builder()
            .router(RouterConfig {
                content_type_header: "Content-Type".to_string(),
            })
            .build();
        assert_eq!(config.content_type_header().unwrap(), http::header::CONTENT_TYPE);
    }

    #[test]
    fn test_validate_empty_level() {
        let result = SwitchyardConfig::builder()
            .logging(LoggingConfig {
                level: "  ".to_string(),
                ..Default::default()
            })
            .build_validated();

        assert!(result.unwrap_err().to_string().contains("logging.level"));
    }

    #[test]
    fn test_validate_bad_level() {
        let result = SwitchyardConfig::builder()
            .logging(LoggingConfig {
                level: "switchyard_router=loud".to_string(),
                ..Default::default()
            })
            .build_validated();

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_validate_empty_handler() {
        let result = SwitchyardConfig::builder()
            .route(RouteSpec::new("GET", "/a", "a"))
            .route(RouteSpec::new("GET", "/b", ""))
            .build_validated();

        assert!(result.unwrap_err().to_string().contains("routes[1].handler"));
    }

    #[test]
    fn test_validate_duplicate_route() {
        let result = SwitchyardConfig::builder()
            .route(RouteSpec::new("GET", "/a", "first"))
            .route(RouteSpec::new("ANY", "/a", "second"))
            .build_validated();

        assert!(matches!(
            result,
            Err(ConfigError::Route(ConfigurationError::DuplicateRoute { .. }))
        ));
    }

    #[test]
    fn test_validate_unknown_method() {
        let result = SwitchyardConfig::builder()
            .route(RouteSpec::new("FETCH", "/a", "a"))
            .build_validated();

        assert!(matches!(
            result,
            Err(ConfigError::Route(ConfigurationError::UnknownMethod(_)))
        ));
    }

    #[test]
    fn test_route_table() {
        let mut json = RouteSpec::new("POST", "/documents", "createJson");
        json.content_type = Some(OneOrMany::One(MatcherSpec::from("application/json")));
        let mut text = RouteSpec::new("POST", "/documents", "createText");
        text.content_type = Some(OneOrMany::One(MatcherSpec::pattern("^text/")));

        let config = SwitchyardConfig::builder()
            .routes([json, text, RouteSpec::new("ANY", "/health", "health")])
            .build();

        let table = config.route_table().unwrap();
        assert_eq!(table.len(), 2 + HttpMethod::COUNT);

        let route = table
            .resolve(HttpMethod::Post, "/documents", Some("application/json"))
            .unwrap();
        assert_eq!(route.handler(), "createJson");

        let route = table
            .resolve(HttpMethod::Post, "/documents", Some("text/csv"))
            .unwrap();
        assert_eq!(route.handler(), "createText");

        let route = table.resolve(HttpMethod::Delete, "/health", None).unwrap();
        assert_eq!(route.handler(), "health");
    }

    #[test]
    fn test_declarations_preserve_order() {
        let config = SwitchyardConfig::builder()
            .route(RouteSpec::new("GET", "/b", "b"))
            .route(RouteSpec::new("GET", "/a", "a"))
            .build();

        let handlers: Vec<String> = config
            .declarations()
            .unwrap()
            .iter()
            .map(|d| d.handler().clone())
            .collect();
        assert_eq!(handlers, ["b", "a"]);
    }

    #[test]
    fn test_development_preset() {
        let config = SwitchyardConfig::development();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.logging.ansi_enabled);
        assert!(config.logging.include_location);
    }

    #[test]
    fn test_production_preset() {
        let config = SwitchyardConfig::production();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(!config.logging.ansi_enabled);
    }

    #[test]
    fn test_toml_serialization() {
        let config = SwitchyardConfig::builder()
            .route(RouteSpec::new("GET", "/a", "a"))
            .build();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[router]"));
        assert!(toml_str.contains("[logging]"));
        assert!(toml_str.contains("[[routes]]"));

        let parsed: SwitchyardConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml_str = r#"
            [router]
            content_type_header = "content-type"
            strict = true
        "#;

        let result: Result<SwitchyardConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }
}
