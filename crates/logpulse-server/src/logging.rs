//! Subscriber setup
//!
//! Two JSON layers share one registry:
//! - console (stdout), filtered at the configured level
//! - file (append), always at debug so the file keeps every generated record

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Level the file layer records at regardless of the console level.
pub const FILE_LEVEL: LevelFilter = LevelFilter::DEBUG;

/// Opens `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(console_level: LevelFilter, file_path: &Path) -> anyhow::Result<()> {
    let file = open_log_file(file_path)?;

    let console = tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_writer(io::stdout)
        .with_filter(console_level);

    let file = tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_filter(FILE_LEVEL);

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()?;

    Ok(())
}
