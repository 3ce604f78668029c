use std::env;

use swimdesk_core::Language;

use crate::environment::Environment;

const DEFAULT_PRODUCTION_URL: &str = "https://api.swimdesk.app";
const DEFAULT_DEVELOPMENT_URL: &str = "http://localhost:8080";
const DEFAULT_AVATAR_PLACEHOLDER: &str = "/images/avatar-placeholder.png";

/// REST API client configuration.
///
/// # Environment Variables
///
/// - `API_URL`: Explicit base URL, wins over the environment-specific ones
/// - `API_URL_PRODUCTION`: Base URL when running on a production hostname
/// - `API_URL_DEVELOPMENT`: Base URL everywhere else
/// - `API_TIMEOUT_SECS`: Request timeout (default: `30`)
/// - `APP_LANGUAGE`: Display language for error messages (`en` or `th`, default: `en`)
/// - `AVATAR_PLACEHOLDER_URL`: Image shown when an avatar cannot be resolved
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub environment: Environment,
    pub timeout_secs: u64,
    pub language: Language,
    pub avatar_placeholder_url: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_lookup(lookup);
        let base_url = crate::non_blank(lookup, "API_URL").unwrap_or_else(|| match environment {
            Environment::Production => crate::non_blank(lookup, "API_URL_PRODUCTION")
                .unwrap_or_else(|| DEFAULT_PRODUCTION_URL.to_string()),
            Environment::Development => crate::non_blank(lookup, "API_URL_DEVELOPMENT")
                .unwrap_or_else(|| DEFAULT_DEVELOPMENT_URL.to_string()),
        });

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            environment,
            timeout_secs: crate::parsed_or(lookup, "API_TIMEOUT_SECS", 30),
            language: crate::non_blank(lookup, "APP_LANGUAGE")
                .map(|code| Language::from_code(&code))
                .unwrap_or_default(),
            avatar_placeholder_url: crate::non_blank(lookup, "AVATAR_PLACEHOLDER_URL")
                .unwrap_or_else(|| DEFAULT_AVATAR_PLACEHOLDER.to_string()),
        }
    }

    /// Config pointing at `base_url` with defaults for everything else.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_lookup(&|_: &str| None)
    }
}
