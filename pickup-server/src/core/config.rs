//! Server configuration

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | Runtime environment |
/// | EVENT_CHANNEL_CAPACITY | 1024 | Broadcast channel capacity |
/// | LOG_LEVEL | info | Log level |
/// | LOG_DIR | (stdout only) | Daily rolling log file directory |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 LOG_DIR=/var/log/pickup cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Capacity of each broadcast channel
    pub event_channel_capacity: usize,
    /// Log level passed to the logger
    pub log_level: String,
    /// Optional directory for daily rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            event_channel_capacity: std::env::var("EVENT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(1024),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            environment: "development".into(),
            event_channel_capacity: 1024,
            log_level: "info".into(),
            log_dir: None,
        }
    }
}
