//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Hosted backend configuration
    pub backend: BackendConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Hosted backend (PostgREST) configuration
///
/// `url` and `anon_key` are both optional. If either one is missing the
/// remote backend is disabled and the site runs on fallback content.
#[derive(Clone, Default)]
pub struct BackendConfig {
    /// Base URL of the hosted project, e.g. `https://xyz.supabase.co`
    pub url: Option<String>,
    /// Anonymous (public) API key
    pub anon_key: Option<String>,
    /// Per-request timeout (in seconds)
    pub timeout_secs: u64,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("anon_key", &self.anon_key.as_ref().map(|_| "<set>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl BackendConfig {
    /// Whether both the URL and the anon key are present
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.anon_key.is_some()
    }

    /// Whether an anon key is set (reported by diagnostics, never the key itself)
    pub fn anon_key_set(&self) -> bool {
        self.anon_key.is_some()
    }

    fn from_env() -> Self {
        Self {
            url: first_non_empty(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]),
            anon_key: first_non_empty(&["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"]),
            timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            backend: BackendConfig::from_env(),
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Returns the first variable in `names` holding a non-blank value
fn first_non_empty(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}
