//! Configuration management for pubmd.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. An optional `pubmd.toml` file (explicit path or auto-discovered in the
//!    current directory and its parents)
//! 2. Environment variables and command-line flags, collected by the CLI into
//!    [`CliSettings`]
//!
//! The API section is only validated when a command needs to talk to the
//! remote API, via [`Config::require_api`]. A dry run never needs it.
//!
//! ## Environment Variable Expansion
//!
//! String values in the file support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `api.base_domain`
//! - `api.endpoint`
//! - `api.get_endpoint`
//! - `api.username`
//! - `api.password`

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override API host.
    pub base_domain: Option<String>,
    /// Override create/update endpoint.
    pub endpoint: Option<String>,
    /// Override list endpoint used for lookup.
    pub get_endpoint: Option<String>,
    /// Override basic auth user.
    pub username: Option<String>,
    /// Override basic auth password.
    pub password: Option<String>,
    /// Override environment mode (`DEV` or `PROD`).
    pub environment: Option<String>,
    /// Override dry-run flag.
    pub dry_run: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pubmd.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote API settings (validated lazily).
    pub api: ApiSettings,
    /// Environment mode.
    pub environment: Environment,
    /// Build the payload but skip every network call.
    pub dry_run: bool,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// API settings as parsed from TOML, before validation.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_domain: Option<String>,
    pub endpoint: Option<String>,
    pub get_endpoint: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Whether the lookup request carries credentials.
    pub authenticate_lookup: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_domain: None,
            endpoint: None,
            get_endpoint: None,
            username: None,
            password: None,
            authenticate_lookup: true,
        }
    }
}

/// Validated API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API host, without scheme (e.g. `blog.example.com`).
    pub base_domain: String,
    /// Path segment for create and update calls.
    pub endpoint: String,
    /// Path segment for the article listing.
    pub get_endpoint: String,
    /// Basic auth user. Empty when not configured.
    pub username: String,
    /// Basic auth password. Empty when not configured.
    pub password: String,
    /// URL scheme for outbound calls.
    pub scheme: Scheme,
    /// Whether the lookup request carries credentials.
    pub authenticate_lookup: bool,
}

impl ApiConfig {
    /// Base URL, e.g. `https://blog.example.com`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}",
            self.scheme,
            self.base_domain.trim_end_matches('/')
        )
    }
}

/// Deployment environment.
///
/// Development talks plain HTTP and logs at debug level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// URL scheme used for outbound calls in this environment.
    #[must_use]
    pub fn scheme(self) -> Scheme {
        match self {
            Self::Development => Scheme::Http,
            Self::Production => Scheme::Https,
        }
    }

    #[must_use]
    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Development),
            "" | "prod" | "production" => Ok(Self::Production),
            other => Err(ConfigError::Validation(format!(
                "unknown environment '{other}' (expected DEV or PROD)"
            ))),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Https => f.write_str("https"),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`api.password`").
        field: String,
        /// Error message (e.g., "${`BLOG_PASSWORD`} not set").
        message: String,
    },
}

/// Require an optional string field to be present and non-empty.
fn require_set<'a>(
    value: Option<&'a str>,
    field: &str,
    env_var: &str,
) -> Result<&'a str, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Validation(format!(
            "{field} is required (set the {env_var} environment variable)"
        ))),
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pubmd.toml` in current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a CLI setting is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings)?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) -> Result<(), ConfigError> {
        let api = &mut self.api;
        for (target, value) in [
            (&mut api.base_domain, &settings.base_domain),
            (&mut api.endpoint, &settings.endpoint),
            (&mut api.get_endpoint, &settings.get_endpoint),
            (&mut api.username, &settings.username),
            (&mut api.password, &settings.password),
        ] {
            if let Some(value) = value {
                *target = Some(value.clone());
            }
        }
        if let Some(environment) = &settings.environment {
            self.environment = environment.parse()?;
        }
        if let Some(dry_run) = settings.dry_run {
            self.dry_run = dry_run;
        }
        Ok(())
    }

    /// Get validated API configuration.
    ///
    /// Use this before any network call; a dry run never needs it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a required setting is missing or
    /// `base_domain` carries a URL scheme.
    pub fn require_api(&self) -> Result<ApiConfig, ConfigError> {
        let api = &self.api;
        let base_domain = require_set(api.base_domain.as_deref(), "api.base_domain", "BASE_DOMAIN")?;
        let endpoint = require_set(api.endpoint.as_deref(), "api.endpoint", "ENDPOINT")?;
        let get_endpoint =
            require_set(api.get_endpoint.as_deref(), "api.get_endpoint", "GET_ENDPOINT")?;

        if base_domain.contains("://") {
            return Err(ConfigError::Validation(
                "api.base_domain must be a host name without http:// or https://".to_owned(),
            ));
        }

        Ok(ApiConfig {
            base_domain: base_domain.trim().to_owned(),
            endpoint: endpoint.trim().to_owned(),
            get_endpoint: get_endpoint.trim().to_owned(),
            username: api.username.clone().unwrap_or_default(),
            password: api.password.clone().unwrap_or_default(),
            scheme: self.environment.scheme(),
            authenticate_lookup: api.authenticate_lookup,
        })
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let api = &mut self.api;
        for (value, field) in [
            (&mut api.base_domain, "api.base_domain"),
            (&mut api.endpoint, "api.endpoint"),
            (&mut api.get_endpoint, "api.get_endpoint"),
            (&mut api.username, "api.username"),
            (&mut api.password, "api.password"),
        ] {
            if let Some(raw) = value {
                *raw = expand::expand_env(raw, field)?;
            }
        }
        Ok(())
    }
}
