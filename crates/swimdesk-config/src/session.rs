use std::env;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

/// Tokens issued before this instant are rejected. Bump it to force every
/// client to log in again after a breaking release.
const DEFAULT_MIN_ISSUED_AT: &str = "2025-01-01T00:00:00Z";
const DEFAULT_STATE_FILE: &str = "swimdesk-state.json";

/// Session persistence and validity configuration.
///
/// # Environment Variables
///
/// - `SESSION_MIN_ISSUED_AT`: App-version cutoff, RFC 3339 or `YYYY-MM-DD`
/// - `SESSION_CHECK_INTERVAL_SECS`: Periodic session re-check interval (default: `60`)
/// - `SWIMDESK_STATE_FILE`: Where session and tenant are persisted. Used as
///   given; `~` is not expanded
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub min_issued_at: DateTime<Utc>,
    pub check_interval_secs: u64,
    pub state_file: PathBuf,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let min_issued_at = match crate::non_blank(lookup, "SESSION_MIN_ISSUED_AT") {
            Some(raw) => parse_cutoff(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Invalid SESSION_MIN_ISSUED_AT, using built-in cutoff");
                default_cutoff()
            }),
            None => default_cutoff(),
        };

        Self {
            min_issued_at,
            check_interval_secs: crate::parsed_or(lookup, "SESSION_CHECK_INTERVAL_SECS", 60u64)
                .max(1),
            state_file: crate::non_blank(lookup, "SWIMDESK_STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
        }
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_lookup(&|_: &str| None)
    }
}

/// Parses an RFC 3339 timestamp or a bare date (midnight UTC).
pub fn parse_cutoff(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn default_cutoff() -> DateTime<Utc> {
    parse_cutoff(DEFAULT_MIN_ISSUED_AT).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
