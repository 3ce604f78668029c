//! # SwimDesk Config
//!
//! Configuration types for the SwimDesk client.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`environment`]: Production vs. development selection from the deployment hostname
//! - [`api`]: REST API base URL, timeout, display language
//! - [`realtime`]: Notification socket URL, mock toggle, reconnect policy
//! - [`session`]: Token cutoff date, re-check interval, state file location
//!
//! Every struct has a `from_env()` constructor and a `from_lookup()` variant
//! taking an arbitrary key lookup, which is what tests use.
//!
//! # Example
//!
//! ```ignore
//! use swimdesk_config::ClientConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = ClientConfig::from_env();
//! println!("API: {}", config.api.base_url);
//! ```

pub mod api;
pub mod environment;
pub mod realtime;
pub mod session;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use environment::Environment;
pub use realtime::RealtimeConfig;
pub use session::SessionConfig;

/// All client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub realtime: RealtimeConfig,
    pub session: SessionConfig,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api: ApiConfig::from_lookup(&lookup),
            realtime: RealtimeConfig::from_lookup(&lookup),
            session: SessionConfig::from_lookup(&lookup),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_: &str| None)
    }
}

/// Reads a non-blank value.
pub(crate) fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads and parses a value, falling back to `default` when absent or invalid.
pub(crate) fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    non_blank(lookup, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Reads a boolean flag (`1`, `true`, `yes`, `on`).
pub(crate) fn flag<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    non_blank(lookup, key).map(|v| {
        matches!(
            v.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}
