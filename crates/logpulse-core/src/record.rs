//! Synthetic log records and the sources that produce them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

// ============================================================================
// Record Types
// ============================================================================

/// Severity of a generated record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Info, Level::Debug, Level::Warn, Level::Error];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message bodies records are drawn from.
pub const MESSAGES: [&str; 8] = [
    "Processing request",
    "Operation completed successfully",
    "Warning: operation may take a while",
    "Failed to process data",
    "Cache refreshed",
    "Data validation performed",
    "Transaction started",
    "Transaction finished",
];

/// Upper bound (inclusive) for generated user identifiers.
pub const MAX_USER_ID: u32 = 1_000;

/// Upper bound (exclusive) for generated request identifiers.
pub const REQUEST_ID_SPACE: i64 = 1_000_000;

/// One synthetic log entry, produced per worker tick and handed to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub worker_id: usize,
    pub user_id: u32,
    pub request_id: i64,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Record Sources
// ============================================================================

/// Produces the content of each emitted record.
///
/// Shared by every worker of every epoch, so implementations must be safe to
/// call concurrently.
pub trait RecordSource: Send + Sync {
    fn next_record(&self, worker_id: usize) -> LogRecord;
}

/// Uniformly random records, backed by `fastrand`'s thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSource;

impl RecordSource for RandomSource {
    fn next_record(&self, worker_id: usize) -> LogRecord {
        LogRecord {
            level: Level::ALL[fastrand::usize(..Level::ALL.len())],
            message: MESSAGES[fastrand::usize(..MESSAGES.len())].to_string(),
            worker_id,
            user_id: fastrand::u32(1..=MAX_USER_ID),
            request_id: fastrand::i64(0..REQUEST_ID_SPACE),
            timestamp: Utc::now(),
        }
    }
}

/// Deterministic source that walks the level and message tables in order.
///
/// The n-th record produced (across all workers) uses `Level::ALL[n % 4]`,
/// `MESSAGES[n % 8]`, user id `n % MAX_USER_ID + 1` and request id `n`.
#[derive(Debug, Default)]
pub struct CyclingSource {
    next: AtomicUsize,
}

impl CyclingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records produced so far.
    pub fn produced(&self) -> usize {
        self.next.load(Ordering::Acquire)
    }
}

impl RecordSource for CyclingSource {
    fn next_record(&self, worker_id: usize) -> LogRecord {
        let n = self.next.fetch_add(1, Ordering::AcqRel);
        LogRecord {
            level: Level::ALL[n % Level::ALL.len()],
            message: MESSAGES[n % MESSAGES.len()].to_string(),
            worker_id,
            user_id: (n % MAX_USER_ID as usize) as u32 + 1,
            request_id: n as i64,
            timestamp: Utc::now(),
        }
    }
}
