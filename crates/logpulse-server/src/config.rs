//! Process configuration
//!
//! Every setting can be given as a flag or through the environment; flags win.

use clap::Parser;
use logpulse_core::{DEFAULT_RATE, DEFAULT_WORKERS, GeneratorConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:5173".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

#[derive(Parser, Debug, Clone)]
#[command(name = "logpulse")]
#[command(about = "Synthetic log traffic generator with an HTTP control API")]
pub struct Settings {
    /// Address to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Console log level (debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// File receiving every log line at debug level and above
    #[arg(long, env = "LOG_FILE_PATH", default_value = "logs/app.log")]
    pub log_file: PathBuf,

    /// Aggregate rate used when generation is started without an explicit rate
    #[arg(short, long, env = "LOG_RATE_PER_SECOND", default_value_t = DEFAULT_RATE)]
    pub rate: u32,

    /// Emission workers per epoch
    #[arg(short, long, env = "LOG_GENERATOR_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Allowed CORS origins (comma-separated)
    #[arg(
        long = "cors-origin",
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values_t = default_cors_origins()
    )]
    pub cors_origins: Vec<String>,

    /// How long to wait for emission workers on shutdown, in milliseconds
    #[arg(long, env = "SHUTDOWN_GRACE_MS", default_value_t = 10_000)]
    pub shutdown_grace_ms: u64,
}

impl Settings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn console_level(&self) -> LevelFilter {
        parse_level(&self.log_level)
    }

    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            workers: self.workers,
            default_rate: self.rate,
        }
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

/// Maps a level name to a filter. Unknown names fall back to `info`.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" | "warning" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}
