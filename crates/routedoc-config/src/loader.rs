//! Layered configuration loading.

use std::env;
use std::fs;
use std::path::Path;

use routedoc_docs::DocExpansion;

use crate::{ConfigError, LogFormat, RoutedocConfig};

/// Default prefix for environment overrides.
pub const DEFAULT_ENV_PREFIX: &str = "ROUTEDOC";

/// Configuration loader.
///
/// Layers are applied in order, later layers overriding earlier ones:
/// 1. Defaults or a preset
/// 2. A configuration file or string (TOML or JSON)
/// 3. Variables from a `.env` file
/// 4. Environment variables named `PREFIX__SECTION__KEY`
///
/// A file or string replaces the whole configuration; fields it leaves out
/// take their default values.
///
/// # Example
///
/// ```no_run
/// use routedoc_config::ConfigLoader;
///
/// # fn main() -> Result<(), routedoc_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("routedoc.toml")?
///     .with_dotenv()?
///     .with_env_prefix("ROUTEDOC")
///     .load()?;
///
/// println!("Serving docs under {}", config.openapi.route_prefix);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: RoutedocConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Create a loader starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to default values.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = RoutedocConfig::default();
        self
    }

    /// Start from the development preset.
    ///
    /// ```
    /// use routedoc_config::{ConfigLoader, LogFormat};
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = RoutedocConfig::development();
        self
    }

    /// Start from the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = RoutedocConfig::production();
        self
    }

    /// Load configuration from a file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The extension is not supported
    /// - The file contains invalid TOML/JSON or unknown fields
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        self.config = parse(&content, format)?;
        Ok(self)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be loaded.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string.
    ///
    /// # Arguments
    ///
    /// * `content` - Configuration content
    /// * `format` - `"toml"` or `"json"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the format is unsupported or parsing fails.
    ///
    /// # Example
    ///
    /// ```
    /// use routedoc_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string("[openapi]\ntitle = \"Shop\"", "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.openapi.title, "Shop");
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = parse(content, format)?;
        Ok(self)
    }

    /// Set the prefix for environment overrides.
    ///
    /// With prefix `ROUTEDOC`, `ROUTEDOC__OPENAPI__TITLE=Shop` sets
    /// `openapi.title`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load variables from a `.env` file in the working directory, if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if the file exists but cannot be parsed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(err) if err.not_found() => Ok(self),
            Err(err) => Err(err.into()),
        }
    }

    /// Load variables from the given `.env` file.
    ///
    /// Variables already set in the environment are kept.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if the file cannot be read or parsed.
    pub fn with_dotenv_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        dotenvy::from_path(path.as_ref())?;
        Ok(self)
    }

    /// Apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override cannot be parsed or validation fails.
    pub fn load(mut self) -> Result<RoutedocConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Return the configuration without overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> RoutedocConfig {
        self.config
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let marker = format!("{prefix}__");
        let mut vars: Vec<(String, String)> =
            env::vars().filter(|(key, _)| key.starts_with(&marker)).collect();
        vars.sort();

        for (key, value) in vars {
            self.apply_env_var(&key, &value, prefix)?;
        }
        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let key_without_prefix = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::env_parse_error(key, "invalid key format"))?;

        let parts: Vec<&str> = key_without_prefix.split("__").collect();
        let config = &mut self.config;

        match parts.as_slice() {
            ["OPENAPI", "TITLE"] => config.openapi.title = value.to_string(),
            ["OPENAPI", "VERSION"] => config.openapi.version = value.to_string(),
            ["OPENAPI", "DESCRIPTION"] => {
                config.openapi.description = (!value.is_empty()).then(|| value.to_string());
            }
            ["OPENAPI", "ROUTE_PREFIX"] => config.openapi.route_prefix = value.to_string(),
            ["OPENAPI", "INTERNAL_PREFIX"] => config.openapi.internal_prefix = value.to_string(),
            ["OPENAPI", "CACHE"] => config.openapi.cache = env_bool(key, value)?,

            ["UI", "ENABLED"] => config.ui.enabled = env_bool(key, value)?,
            ["UI", "LISTING_ENABLED"] => config.ui.listing_enabled = env_bool(key, value)?,
            ["UI", "DEEP_LINKING"] => config.ui.deep_linking = env_bool(key, value)?,
            ["UI", "DOC_EXPANSION"] => {
                config.ui.doc_expansion = value
                    .parse::<DocExpansion>()
                    .map_err(|reason| ConfigError::env_parse_error(key, reason))?;
            }
            ["UI", "SWAGGER_VERSION"] => config.ui.swagger_version = value.to_string(),

            ["LOGGING", "ENABLED"] => config.logging.enabled = env_bool(key, value)?,
            ["LOGGING", "LEVEL"] => config.logging.level = value.to_string(),
            ["LOGGING", "FORMAT"] => {
                config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }
            ["LOGGING", "INCLUDE_LOCATION"] => {
                config.logging.include_location = env_bool(key, value)?;
            }

            ["METRICS", "ENABLED"] => config.metrics.enabled = env_bool(key, value)?,

            // Unknown keys are ignored; servers are configured by file only.
            _ => {}
        }

        Ok(())
    }
}

fn parse(content: &str, format: &str) -> Result<RoutedocConfig, ConfigError> {
    match format.to_lowercase().as_str() {
        "toml" => Ok(toml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        other => Err(ConfigError::unsupported_format(other)),
    }
}

fn env_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_defaults() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, RoutedocConfig::default());
    }

    #[test]
    fn test_loader_presets() {
        let config = ConfigLoader::new().with_production().load().unwrap();
        assert!(config.openapi.cache);

        let config = ConfigLoader::new().with_production().with_defaults().load().unwrap();
        assert!(!config.openapi.cache);
    }

    #[test]
    fn test_loader_with_string_toml() {
        let toml = r#"
            [openapi]
            title = "Shop"
            route_prefix = "/api-docs"

            [[servers]]
            url = "https://shop.example.com"
        "#;
        let config = ConfigLoader::new().with_string(toml, "toml").unwrap().load().unwrap();

        assert_eq!(config.openapi.title, "Shop");
        assert_eq!(config.openapi.route_prefix, "/api-docs");
        assert_eq!(config.openapi.version, "1.0.0");
        assert_eq!(config.servers[0].url, "https://shop.example.com");
    }

    #[test]
    fn test_loader_with_string_json() {
        let json = r#"{ "ui": { "enabled": false }, "metrics": { "enabled": true } }"#;
        let config = ConfigLoader::new().with_string(json, "JSON").unwrap().load().unwrap();

        assert!(!config.ui.enabled);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_loader_rejects_unknown_fields() {
        let result = ConfigLoader::new().with_string("[openapi]\nprefix = \"/x\"", "toml");
        assert!(matches!(result, Err(ConfigError::TomlError(_))));

        let result = ConfigLoader::new().with_string("[swagger]\n", "toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_loader_unsupported_format() {
        let result = ConfigLoader::new().with_string("title: x", "yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_loader_validates_on_load() {
        let result = ConfigLoader::new()
            .with_string("[openapi]\nroute_prefix = \"docs\"", "toml")
            .unwrap()
            .load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_loader_with_file_not_found() {
        let result = ConfigLoader::new().with_file("/nonexistent/routedoc.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_loader_with_optional_file_not_found() {
        let config = ConfigLoader::new()
            .with_optional_file("/nonexistent/routedoc.toml")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config.openapi.route_prefix, "/docs");
    }

    #[test]
    fn test_loader_load_unvalidated() {
        let config = ConfigLoader::new()
            .with_string("[openapi]\ntitle = \"\"", "toml")
            .unwrap()
            .load_unvalidated();
        assert!(config.openapi.title.is_empty());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_bool() {
        for value in ["true", "True", "1", "yes", "on"] {
            assert_eq!(parse_bool(value), Some(true), "{value}");
        }
        for value in ["false", "FALSE", "0", "no", "off"] {
            assert_eq!(parse_bool(value), Some(false), "{value}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_apply_env_var_openapi() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__OPENAPI__TITLE", "Shop", "TEST").unwrap();
        loader.apply_env_var("TEST__OPENAPI__DESCRIPTION", "Shop API", "TEST").unwrap();
        loader.apply_env_var("TEST__OPENAPI__CACHE", "yes", "TEST").unwrap();

        assert_eq!(loader.config.openapi.title, "Shop");
        assert_eq!(loader.config.openapi.description.as_deref(), Some("Shop API"));
        assert!(loader.config.openapi.cache);

        loader.apply_env_var("TEST__OPENAPI__DESCRIPTION", "", "TEST").unwrap();
        assert!(loader.config.openapi.description.is_none());
    }

    #[test]
    fn test_apply_env_var_ui_and_logging() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__UI__DOC_EXPANSION", "full", "TEST").unwrap();
        loader.apply_env_var("TEST__UI__LISTING_ENABLED", "off", "TEST").unwrap();
        loader.apply_env_var("TEST__LOGGING__FORMAT", "Pretty", "TEST").unwrap();
        loader.apply_env_var("TEST__LOGGING__LEVEL", "routedoc_docs=debug", "TEST").unwrap();
        loader.apply_env_var("TEST__METRICS__ENABLED", "1", "TEST").unwrap();

        assert_eq!(loader.config.ui.doc_expansion, DocExpansion::Full);
        assert!(!loader.config.ui.listing_enabled);
        assert_eq!(loader.config.logging.format, LogFormat::Pretty);
        assert_eq!(loader.config.logging.level, "routedoc_docs=debug");
        assert!(loader.config.metrics.enabled);
    }

    #[test]
    fn test_apply_env_var_invalid_values() {
        let mut loader = ConfigLoader::new();
        assert!(loader.apply_env_var("TEST__OPENAPI__CACHE", "sometimes", "TEST").is_err());
        assert!(loader.apply_env_var("TEST__UI__DOC_EXPANSION", "all", "TEST").is_err());
        assert!(loader.apply_env_var("TEST__LOGGING__FORMAT", "xml", "TEST").is_err());
    }

    #[test]
    fn test_apply_env_var_unknown_key_ignored() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__SERVER__PORT", "8080", "TEST").unwrap();
        assert_eq!(loader.config, RoutedocConfig::default());
    }
}
