//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default upstream provider root
pub const DEFAULT_ODDS_API_BASE_URL: &str = "https://api.the-odds-api.com/v4";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream provider configuration
    pub upstream: UpstreamConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Public URL advertised in the API description
    pub public_base_url: Option<String>,
}

/// Upstream odds provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Provider API key, `None` when not configured
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Provider API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origin for CORS, `*` for any
    pub allowed_origin: String,
    /// Shared secret for local callers, `None` disables the gate
    #[serde(skip_serializing)]
    pub local_api_key: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| default.to_string())
        };
        // Blank values count as unset; anything else is kept verbatim
        let get_optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let settings = Self {
            server: ServerConfig {
                host: get_or_default("HOST", "0.0.0.0"),
                port: get_or_default("PORT", "8080")
                    .parse()
                    .context("Invalid port number")?,
                public_base_url: get_optional("PUBLIC_BASE_URL")
                    .map(|url| url.trim().trim_end_matches('/').to_string()),
            },
            upstream: UpstreamConfig {
                api_key: get_optional("ODDS_API_KEY"),
                base_url: get_or_default("ODDS_API_BASE_URL", DEFAULT_ODDS_API_BASE_URL)
                    .trim_end_matches('/')
                    .to_string(),
                timeout: get_or_default("UPSTREAM_TIMEOUT", "15")
                    .parse()
                    .context("Invalid upstream timeout value")?,
            },
            security: SecurityConfig {
                allowed_origin: get_or_default("CORS_ORIGIN", "*").trim().to_string(),
                local_api_key: get_optional("LOCAL_API_KEY"),
            },
            logging: LoggingConfig {
                level: get_or_default("RUST_LOG", "info"),
                format: get_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if !self.upstream.base_url.starts_with("http") {
            anyhow::bail!("Invalid upstream base URL format, should start with 'http'");
        }

        if let Some(url) = &self.server.public_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("Invalid public base URL format, should start with 'http://' or 'https://'");
            }
        }

        if self.upstream.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        if self.security.allowed_origin.is_empty() {
            anyhow::bail!("CORS origin cannot be empty");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Whether local callers must present the shared secret
    pub fn auth_enabled(&self) -> bool {
        self.security.local_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[]).unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.upstream.base_url, DEFAULT_ODDS_API_BASE_URL);
        assert_eq!(settings.upstream.timeout, 15);
        assert_eq!(settings.security.allowed_origin, "*");
        assert!(settings.upstream.api_key.is_none());
        assert!(!settings.auth_enabled());
    }

    #[test]
    fn test_empty_secret_disables_auth() {
        let settings = settings_from(&[("LOCAL_API_KEY", "  ")]).unwrap();
        assert!(!settings.auth_enabled());

        let settings = settings_from(&[("LOCAL_API_KEY", "S")]).unwrap();
        assert!(settings.auth_enabled());
    }

    #[test]
    fn test_secret_is_kept_verbatim() {
        let settings = settings_from(&[("LOCAL_API_KEY", " S ")]).unwrap();
        assert_eq!(settings.security.local_api_key.as_deref(), Some(" S "));
    }

    #[test]
    fn test_secrets_are_not_serialized() {
        let settings = settings_from(&[
            ("ODDS_API_KEY", "upstream-secret"),
            ("LOCAL_API_KEY", "local-secret"),
        ])
        .unwrap();

        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("upstream-secret"));
        assert!(!json.contains("local-secret"));
    }
}
