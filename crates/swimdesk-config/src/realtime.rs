use std::env;
use std::time::Duration;

const DEFAULT_SOCKET_PATH: &str = "/socket/notification";

/// Realtime notification socket configuration.
///
/// # Environment Variables
///
/// - `SOCKET_SERVER_URL`: Socket server origin, e.g. `https://ws.swimdesk.app`
/// - `SOCKET_PATH`: Socket path (default: `/socket/notification`)
/// - `SOCKET_MOCK`: Force mock mode. Defaults to `true` when no server URL is set
/// - `SOCKET_RECONNECT_ATTEMPTS`: Connection attempts before giving up (default: `5`)
/// - `SOCKET_RECONNECT_DELAY_MS`: Constant delay between attempts (default: `2000`)
/// - `SOCKET_MOCK_CONNECT_DELAY_MS`: Simulated connect latency in mock mode (default: `1000`)
/// - `SOCKET_MOCK_REPLY_DELAY_MS`: Simulated reply latency in mock mode (default: `1500`)
#[derive(Clone, Debug)]
pub struct RealtimeConfig {
    pub server_url: Option<String>,
    pub path: String,
    pub mock: bool,
    pub reconnect_attempts: u8,
    pub reconnect_delay_ms: u64,
    pub mock_connect_delay_ms: u64,
    pub mock_reply_delay_ms: u64,
}

impl RealtimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = crate::non_blank(lookup, "SOCKET_SERVER_URL")
            .map(|url| url.trim_end_matches('/').to_string());
        let mock = crate::flag(lookup, "SOCKET_MOCK").unwrap_or(server_url.is_none());

        let mut path =
            crate::non_blank(lookup, "SOCKET_PATH").unwrap_or_else(|| DEFAULT_SOCKET_PATH.to_string());
        if !path.starts_with('/') {
            path.insert(0, '/');
        }

        Self {
            server_url,
            path,
            mock,
            reconnect_attempts: crate::parsed_or(lookup, "SOCKET_RECONNECT_ATTEMPTS", 5u8).max(1),
            reconnect_delay_ms: crate::parsed_or(lookup, "SOCKET_RECONNECT_DELAY_MS", 2000),
            mock_connect_delay_ms: crate::parsed_or(lookup, "SOCKET_MOCK_CONNECT_DELAY_MS", 1000),
            mock_reply_delay_ms: crate::parsed_or(lookup, "SOCKET_MOCK_REPLY_DELAY_MS", 1500),
        }
    }

    /// Full connection URL, `<SERVER_URL><PATH>`. `None` without a server URL.
    pub fn url(&self) -> Option<String> {
        self.server_url
            .as_ref()
            .map(|server| format!("{}{}", server, self.path))
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn mock_connect_delay(&self) -> Duration {
        Duration::from_millis(self.mock_connect_delay_ms)
    }

    pub fn mock_reply_delay(&self) -> Duration {
        Duration::from_millis(self.mock_reply_delay_ms)
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self::from_lookup(&|_: &str| None)
    }
}
