use std::env;

const DEFAULT_PRODUCTION_HOSTS: &str = "swimdesk.app,www.swimdesk.app,admin.swimdesk.app";

/// Deployment environment, inferred from the hostname the client runs under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    /// Matches `hostname` (port ignored) against the production host list.
    pub fn from_hostname(hostname: &str, production_hosts: &[String]) -> Self {
        let host = hostname
            .trim()
            .split(':')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        if !host.is_empty() && production_hosts.iter().any(|h| h.eq_ignore_ascii_case(&host)) {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    /// Uses `APP_HOSTNAME` and `PRODUCTION_HOSTS` (comma separated).
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let hosts: Vec<String> = crate::non_blank(lookup, "PRODUCTION_HOSTS")
            .unwrap_or_else(|| DEFAULT_PRODUCTION_HOSTS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        match crate::non_blank(lookup, "APP_HOSTNAME") {
            Some(hostname) => Self::from_hostname(&hostname, &hosts),
            None => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts() -> Vec<String> {
        vec!["swimdesk.app".to_string(), "admin.swimdesk.app".to_string()]
    }

    #[test]
    fn test_production_hostname() {
        assert_eq!(
            Environment::from_hostname("admin.swimdesk.app", &hosts()),
            Environment::Production
        );
        assert_eq!(
            Environment::from_hostname("SwimDesk.App:443", &hosts()),
            Environment::Production
        );
    }

    #[test]
    fn test_other_hostnames_are_development() {
        assert_eq!(
            Environment::from_hostname("localhost:3000", &hosts()),
            Environment::Development
        );
        assert_eq!(
            Environment::from_hostname("staging.swimdesk.app", &hosts()),
            Environment::Development
        );
        assert_eq!(Environment::from_hostname("", &hosts()), Environment::Development);
    }

    #[test]
    fn test_from_lookup_without_hostname() {
        let env = Environment::from_lookup(&|_: &str| None);
        assert_eq!(env, Environment::Development);
    }
}
