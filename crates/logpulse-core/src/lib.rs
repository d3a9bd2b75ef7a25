//! # logpulse-core - Synthetic Log Traffic Generator
//!
//! Emits structured log records at a configurable aggregate rate to exercise
//! log-ingestion and observability pipelines.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        LogGenerator                          │
//! │   start / resume / stop / update_rate   (exclusive lock)     │
//! │   status                                (read lock + atomic) │
//! │                                                              │
//! │   ┌────────────────────────────────────────────────────────┐ │
//! │   │ active Epoch (seq, rate, CancellationToken)            │ │
//! │   │   worker 0 .. worker N-1  ── tick ──▶ RecordSource     │ │
//! │   │                                        │               │ │
//! │   │                                        ▼               │ │
//! │   │                                  EmissionSink          │ │
//! │   └────────────────────────────────────────────────────────┘ │
//! │                       emitted counter (AtomicU64)            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logpulse_core::{GeneratorConfig, LogGenerator, TracingSink};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), logpulse_core::GeneratorError> {
//! let generator = LogGenerator::new(Arc::new(TracingSink), GeneratorConfig::default())?;
//! generator.start(2_000)?;
//! generator.update_rate(500)?;
//! println!("{:?}", generator.status());
//! generator.stop();
//! # Ok(())
//! # }
//! ```

pub mod epoch;
pub mod error;
pub mod generator;
pub mod rate;
pub mod record;
pub mod sink;

pub use epoch::{MIN_INTERVAL, WorkerPlan};
pub use error::{GeneratorError, RateViolation, Result};
pub use generator::{
    DEFAULT_RATE, DEFAULT_WORKERS, GeneratorConfig, LogGenerator, RateChange, StartOutcome,
    StatusSnapshot, StopOutcome,
};
pub use rate::{MAX_RATE, Rate};
pub use record::{CyclingSource, Level, LogRecord, MESSAGES, RandomSource, RecordSource};
pub use sink::{EmissionSink, GENERATED_TARGET, MemorySink, NullSink, TracingSink};
