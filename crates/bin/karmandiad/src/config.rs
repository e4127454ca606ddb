//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `karmandia.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use chrono::TimeDelta;
use karmandia_adapter_backend_reqwest::BackendConfig;
use karmandia_adapter_http_axum::dashboard::auth::{LOGIN_ROUTE, is_local_route};
use karmandia_adapter_http_axum::session::DEFAULT_COOKIE_NAME;
use karmandia_domain::navigation::DASHBOARD_ROOT;
use serde::Deserialize;
use url::Url;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Remote REST API.
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub dashboard: DashboardConfig,
    pub cache: CacheConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Session cookie and identity provider.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Where the browser goes after logging out. A local route also serves
    /// the token form; an absolute http(s) URL points at an external
    /// sign-in page.
    pub login_route: String,
    /// Remote sign-out endpoint. Unset ends sessions locally only.
    pub sign_out_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Where the browser goes after an experience is created.
    pub after_create_route: String,
    /// How many uploaded images are kept for form re-renders.
    pub preview_capacity: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds a fetched collection is served without refetching.
    /// Zero refetches on every read.
    pub stale_after_secs: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `karmandia.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("karmandia.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("KARMANDIA_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("KARMANDIA_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("KARMANDIA_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("KARMANDIA_BACKEND_URL") {
            self.backend.base_url = val;
        }
        if let Some(val) = var("KARMANDIA_LOGIN_ROUTE") {
            self.session.login_route = val;
        }
        if let Some(val) = var("KARMANDIA_SIGN_OUT_URL") {
            self.session.sign_out_url = Some(val).filter(|url| !url.trim().is_empty());
        }
        if let Some(val) = var("KARMANDIA_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        let base_url = Url::parse(self.backend.base_url.trim()).map_err(|err| {
            ConfigError::Validation(format!("backend.base_url is not a valid URL: {err}"))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(
                "backend.base_url must use http or https".to_string(),
            ));
        }
        let cookie_name = &self.session.cookie_name;
        if cookie_name.is_empty()
            || !cookie_name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            return Err(ConfigError::Validation(
                "session.cookie_name must be a non-empty token".to_string(),
            ));
        }
        let login_route = self.session.login_route.as_str();
        let external = Url::parse(login_route)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
        if !external && !is_local_route(login_route) {
            return Err(ConfigError::Validation(format!(
                "session.login_route must be a free local route or an http(s) URL, got {login_route:?}"
            )));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl CacheConfig {
    #[must_use]
    pub fn stale_after(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.stale_after_secs))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            login_route: LOGIN_ROUTE.to_string(),
            sign_out_url: None,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            after_create_route: DASHBOARD_ROOT.to_string(),
            preview_capacity: 16,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "karmandiad=info,karmandia=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
