//! Log output and request-timing settings for the coupons server.

use clap::Args;

/// How log lines are rendered on stdout.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// One terse line per event, for local development.
    Compact,

    /// One JSON object per event, with the current span and its parents.
    Json,
}

/// Verbosity and format of the tracing subscriber.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default directive for the env filter (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Line format: compact or json
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Request timing settings for the request-logging middleware.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Requests slower than this many milliseconds are logged as warnings.
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}
