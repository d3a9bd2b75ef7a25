//! Emission sinks
//!
//! A sink receives every generated record. The generator never inspects
//! what a sink does with a record: delivery is best-effort and failures stay
//! inside the sink.

use crate::record::{Level, LogRecord};
use chrono::SecondsFormat;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

/// `tracing` target generated records are emitted on.
pub const GENERATED_TARGET: &str = "logpulse::generated";

/// Destination for generated records. Called concurrently from every worker.
pub trait EmissionSink: Send + Sync {
    fn emit(&self, record: &LogRecord);
}

/// Writes each record as a `tracing` event at the record's own level, so the
/// installed subscriber decides where it lands (console, file, both).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EmissionSink for TracingSink {
    fn emit(&self, record: &LogRecord) {
        let timestamp = record
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        match record.level {
            Level::Debug => debug!(
                target: GENERATED_TARGET,
                worker_id = record.worker_id,
                user_id = record.user_id,
                request_id = record.request_id,
                timestamp = %timestamp,
                "{}",
                record.message
            ),
            Level::Info => info!(
                target: GENERATED_TARGET,
                worker_id = record.worker_id,
                user_id = record.user_id,
                request_id = record.request_id,
                timestamp = %timestamp,
                "{}",
                record.message
            ),
            Level::Warn => warn!(
                target: GENERATED_TARGET,
                worker_id = record.worker_id,
                user_id = record.user_id,
                request_id = record.request_id,
                timestamp = %timestamp,
                "{}",
                record.message
            ),
            Level::Error => error!(
                target: GENERATED_TARGET,
                worker_id = record.worker_id,
                user_id = record.user_id,
                request_id = record.request_id,
                timestamp = %timestamp,
                "{}",
                record.message
            ),
        }
    }
}

/// Keeps every record in memory. Meant for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Copy of everything captured so far, in arrival order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl EmissionSink for MemorySink {
    fn emit(&self, record: &LogRecord) {
        self.records.lock().push(record.clone());
    }
}

/// Drops every record. Useful for measuring pure scheduling throughput.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EmissionSink for NullSink {
    fn emit(&self, _record: &LogRecord) {}
}
