use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const WORKSPACE_TARGETS: [&str; 6] = [
    "swimdesk",
    "swimdesk_core",
    "swimdesk_config",
    "swimdesk_auth",
    "swimdesk_models",
    "swimdesk_session",
];

/// Initialize console logging on stderr.
///
/// # Configuration
///
/// - **Log Level**: `LOG_LEVEL` (default: `default_level`) for workspace crates
/// - **Filtering**: `RUST_LOG` replaces the computed filter entirely
/// - **Format**: `LOG_FORMAT=json` for one JSON object per line, compact text otherwise
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(default_level: &str) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| default_level.to_string());
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&log_level)));

    let console_layer = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(true)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_ansi(std::io::stderr().is_terminal())
            .boxed()
    };

    let _ = tracing_subscriber::registry()
        .with(console_layer.with_filter(env_filter))
        .try_init();
}

fn default_directives(level: &str) -> String {
    let mut directives: Vec<String> = WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect();
    directives.extend(
        ["rust_socketio=warn", "rust_engineio=warn", "reqwest=warn", "hyper=warn"]
            .iter()
            .map(|d| d.to_string()),
    );
    directives.join(",")
}
