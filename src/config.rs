/// Configuration management for the identity resolver
use crate::error::{IdentityError, IdentityResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default Mojang profile API
pub const DEFAULT_API_URL: &str = "https://api.mojang.com";

/// Default Mojang session server
pub const DEFAULT_SESSION_URL: &str = "https://sessionserver.mojang.com";

/// Resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Authenticated ("online") mode: identifiers come from the remote service
    pub online_mode: bool,
    pub remote: RemoteConfig,
    pub logging: LoggingConfig,
}

/// Remote identity service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL for name -> UUID lookups
    pub api_url: String,
    /// Base URL for UUID -> profile lookups
    pub session_url: String,
    /// Upper bound on a single HTTP request, in seconds
    pub timeout_secs: u64,
    /// User-Agent header for HTTP requests
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_url: DEFAULT_SESSION_URL.to_string(),
            timeout_secs: 10,
            user_agent: format!("player-identity/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            online_mode: true,
            remote: RemoteConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> IdentityResult<Self> {
        dotenv::dotenv().ok();

        let defaults = RemoteConfig::default();

        let online_mode = match env::var("IDENTITY_ONLINE_MODE") {
            Ok(raw) => parse_bool(&raw).ok_or_else(|| {
                IdentityError::Validation(format!("Invalid IDENTITY_ONLINE_MODE: {}", raw))
            })?,
            Err(_) => true,
        };

        let api_url = env::var("IDENTITY_API_URL").unwrap_or(defaults.api_url);
        let session_url = env::var("IDENTITY_SESSION_URL").unwrap_or(defaults.session_url);
        let timeout_secs = env::var("IDENTITY_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| IdentityError::Validation("Invalid HTTP timeout".to_string()))?;
        let user_agent = env::var("IDENTITY_USER_AGENT").unwrap_or(defaults.user_agent);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let config = ResolverConfig {
            online_mode,
            remote: RemoteConfig {
                api_url: api_url.trim_end_matches('/').to_string(),
                session_url: session_url.trim_end_matches('/').to_string(),
                timeout_secs,
                user_agent,
            },
            logging: LoggingConfig { level: log_level },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> IdentityResult<()> {
        if self.online_mode {
            if self.remote.api_url.is_empty() || self.remote.session_url.is_empty() {
                return Err(IdentityError::Validation(
                    "Remote URLs are required in online mode".to_string(),
                ));
            }
            for url in [&self.remote.api_url, &self.remote.session_url] {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(IdentityError::Validation(format!(
                        "Remote URL must be http(s): {}",
                        url
                    )));
                }
            }
        }

        if self.remote.timeout_secs == 0 {
            return Err(IdentityError::Validation(
                "HTTP timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
