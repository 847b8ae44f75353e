//! Configuration settings
//!
//! Settings are loaded from a TOML file, then overridden by environment
//! variables. `NEXT_PUBLIC_API_URL` carries the backend base URL, matching the
//! variable the web front-end is deployed with.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "NEXT_PUBLIC_API_URL";

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_refresh_path() -> String {
    "/refresh-token".to_string()
}

fn default_token_cookie() -> String {
    crate::cookies::SESSION_TOKEN_COOKIE.to_string()
}

fn default_refresh_cookie() -> String {
    crate::cookies::REFRESH_TOKEN_COOKIE.to_string()
}

fn default_cookie_max_age() -> u64 {
    60 * 60 * 24 * 30 // 30 days
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn default_expiry_messages() -> Vec<String> {
    vec![
        "jwt expired".to_string(),
        "invalid signature".to_string(),
        "Invalid token".to_string(),
    ]
}

fn default_host() -> String {
    "::".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_home_route() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    crate::utils::version::user_agent()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Main configuration settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiSettings,
    /// Session cookie and refresh configuration
    #[serde(default)]
    pub session: SessionSettings,
    /// Page server configuration
    #[serde(default)]
    pub server: ServerSettings,
    /// HTTP client configuration
    #[serde(default)]
    pub network: NetworkSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL every request path is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the refresh endpoint
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
}

/// Session cookie and refresh configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Cookie holding the session token
    #[serde(default = "default_token_cookie")]
    pub token_cookie: String,
    /// Cookie holding the refresh token
    #[serde(default = "default_refresh_cookie")]
    pub refresh_cookie: String,
    /// Max-Age written with a refreshed session token, in seconds
    #[serde(default = "default_cookie_max_age")]
    pub cookie_max_age: u64,
    /// Path written with a refreshed session token
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,
    /// 401 messages that mean "token expired, refresh it"
    #[serde(default = "default_expiry_messages")]
    pub expiry_messages: Vec<String>,
}

/// Page server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Where authenticated visitors are sent from guest-only pages
    #[serde(default = "default_home_route")]
    pub home_route: String,
    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            refresh_path: default_refresh_path(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            token_cookie: default_token_cookie(),
            refresh_cookie: default_refresh_cookie(),
            cookie_max_age: default_cookie_max_age(),
            cookie_path: default_cookie_path(),
            expiry_messages: default_expiry_messages(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            home_route: default_home_route(),
            enable_cors: default_true(),
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
            format: default_log_format(),
        }
    }
}

impl NetworkSettings {
    /// Connection timeout as a [`Duration`]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl SessionSettings {
    /// Whether a 401 `message` asks for a token refresh
    pub fn is_expiry_message(&self, message: &str) -> bool {
        self.expiry_messages.iter().any(|m| m == message)
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables
    pub fn from_env() -> crate::Result<Self> {
        Self::default().merge_with_env()
    }

    /// Load settings from configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config("file", &format!("Failed to read config file: {}", e))
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| {
            crate::Error::config("file", &format!("Failed to parse config file: {}", e))
        })?;

        Ok(settings)
    }

    /// Merge settings with environment variable overrides
    ///
    /// Any variable that is set wins over the current value.
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        if let Ok(base_url) = std::env::var(API_URL_ENV) {
            self.api.base_url = base_url;
        }

        if let Ok(host) = std::env::var("SESSION_GATE_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("SESSION_GATE_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| crate::Error::config("port", &format!("Invalid port: {}", e)))?;
        }

        if let Ok(timeout) = std::env::var("REQUEST_TIMEOUT") {
            self.network.request_timeout = timeout.parse().map_err(|e| {
                crate::Error::config("request_timeout", &format!("Invalid timeout: {}", e))
            })?;
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(verbose) = std::env::var("VERBOSE") {
            self.logging.verbose = matches!(verbose.as_str(), "1" | "true" | "yes");
        }

        Ok(self)
    }

    /// Parsed backend base URL
    pub fn base_url(&self) -> crate::Result<url::Url> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            crate::Error::config(
                "base_url",
                &format!("Invalid base URL '{}': {}", self.api.base_url, e),
            )
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.port == 0 {
            return Err(crate::Error::config(
                "port",
                "Invalid server port: cannot be 0",
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_level",
                    &format!("Invalid log level: {}", self.logging.level),
                ));
            }
        }

        match self.logging.format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(crate::Error::config(
                    "log_format",
                    &format!("Invalid log format: {}", other),
                ));
            }
        }

        self.base_url()?;

        if !self.api.refresh_path.starts_with('/') {
            return Err(crate::Error::config(
                "refresh_path",
                "Refresh path must start with '/'",
            ));
        }

        for (name, value) in [
            ("token_cookie", &self.session.token_cookie),
            ("refresh_cookie", &self.session.refresh_cookie),
        ] {
            if value.is_empty() || value.contains([';', '=', ' ']) {
                return Err(crate::Error::config(
                    name,
                    &format!("Invalid cookie name: '{}'", value),
                ));
            }
        }

        if self.session.cookie_max_age == 0 {
            return Err(crate::Error::config(
                "cookie_max_age",
                "Session cookie max age cannot be 0",
            ));
        }

        if !self.server.home_route.starts_with('/') {
            return Err(crate::Error::config(
                "home_route",
                "Home route must start with '/'",
            ));
        }

        Ok(())
    }
}
