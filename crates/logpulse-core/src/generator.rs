//! Generator controller
//!
//! Owns the run state and the active [`Epoch`]. Control operations
//! (`start`, `resume`, `stop`, `update_rate`) are serialized by the write
//! side of one lock; `status` only takes the read side plus an atomic load,
//! and workers never touch the lock at all.
//!
//! Teardown of a superseded epoch is fire-and-forget: the call returns as soon
//! as the token is cancelled. [`LogGenerator::shutdown`] is the draining
//! variant used when the process exits.

use crate::epoch::{EmissionContext, Epoch, WorkerPlan};
use crate::error::{GeneratorError, Result};
use crate::rate::Rate;
use crate::record::{RandomSource, RecordSource};
use crate::sink::EmissionSink;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Default number of workers per epoch.
pub const DEFAULT_WORKERS: usize = 10;

/// Default aggregate rate used by [`LogGenerator::resume`] until changed.
pub const DEFAULT_RATE: u32 = 2_000;

/// Generator construction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Workers spawned per epoch (values below 1 are treated as 1)
    pub workers: usize,
    /// Stored rate before any start or rate update
    pub default_rate: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            default_rate: DEFAULT_RATE,
        }
    }
}

/// Point-in-time view of the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub is_running: bool,
    pub total_logs: u64,
    pub rate_per_second: u32,
}

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { rate: u32, epoch: u64 },
    AlreadyRunning { rate: u32 },
}

impl StartOutcome {
    pub fn started(&self) -> bool {
        matches!(self, StartOutcome::Started { .. })
    }
}

/// Result of a stop request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped { total_logs: u64 },
    NotRunning,
}

/// Result of a successful rate update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateChange {
    pub previous: u32,
    pub current: u32,
    /// Whether a new epoch was launched (false while stopped)
    pub applied_live: bool,
}

struct ControlState {
    running: bool,
    rate: Rate,
    epoch: Option<Epoch>,
    next_seq: u64,
}

/// Multi-worker synthetic log generator
pub struct LogGenerator {
    control: RwLock<ControlState>,
    ctx: EmissionContext,
    workers: usize,
}

impl LogGenerator {
    /// Creates a stopped generator that draws records from [`RandomSource`].
    pub fn new(sink: Arc<dyn EmissionSink>, config: GeneratorConfig) -> Result<Self> {
        Self::with_source(sink, Arc::new(RandomSource), config)
    }

    pub fn with_source(
        sink: Arc<dyn EmissionSink>,
        source: Arc<dyn RecordSource>,
        config: GeneratorConfig,
    ) -> Result<Self> {
        let rate = Rate::new(i64::from(config.default_rate))?;

        Ok(Self {
            control: RwLock::new(ControlState {
                running: false,
                rate,
                epoch: None,
                next_seq: 0,
            }),
            ctx: EmissionContext {
                source,
                sink,
                emitted: Arc::new(AtomicU64::new(0)),
                live_workers: Arc::new(AtomicUsize::new(0)),
            },
            workers: config.workers.max(1),
        })
    }

    /// Starts emitting at `rate`. A no-op if already running.
    ///
    /// Fails with [`GeneratorError::NoRuntime`] outside a Tokio runtime.
    pub fn start(&self, rate: i64) -> Result<StartOutcome> {
        let rate = Rate::new(rate)?;
        let mut state = self.control.write();
        self.start_locked(&mut state, rate)
    }

    /// Starts emitting at the stored rate. A no-op if already running.
    pub fn resume(&self) -> Result<StartOutcome> {
        let mut state = self.control.write();
        let rate = state.rate;
        self.start_locked(&mut state, rate)
    }

    /// Cancels the active epoch without waiting for its workers.
    pub fn stop(&self) -> StopOutcome {
        let mut state = self.control.write();
        if !state.running {
            return StopOutcome::NotRunning;
        }

        if let Some(epoch) = state.epoch.take() {
            epoch.cancel();
        }
        state.running = false;

        let total_logs = self.ctx.emitted.load(Ordering::Acquire);
        info!(total_logs, "log generation stopped");
        StopOutcome::Stopped { total_logs }
    }

    /// Changes the aggregate rate.
    ///
    /// While running, the replacement epoch is launched and installed before
    /// the old one is cancelled, so emission never pauses; for a short window
    /// both pools may emit. While stopped only the stored rate changes.
    pub fn update_rate(&self, rate: i64) -> Result<RateChange> {
        let rate = Rate::new(rate)?;
        let mut state = self.control.write();
        let previous = state.rate;

        if !state.running {
            state.rate = rate;
            debug!(
                previous_rate = previous.get(),
                new_rate = rate.get(),
                "stored rate updated while stopped"
            );
            return Ok(RateChange {
                previous: previous.get(),
                current: rate.get(),
                applied_live: false,
            });
        }

        let runtime = current_runtime()?;
        let next = self.launch(&runtime, &mut state, rate);
        let superseded = state.epoch.replace(next);
        state.rate = rate;

        if let Some(old) = superseded {
            old.cancel();
        }

        info!(
            previous_rate = previous.get(),
            new_rate = rate.get(),
            "log rate updated"
        );

        Ok(RateChange {
            previous: previous.get(),
            current: rate.get(),
            applied_live: true,
        })
    }

    pub fn status(&self) -> StatusSnapshot {
        let state = self.control.read();
        StatusSnapshot {
            is_running: state.running,
            total_logs: self.ctx.emitted.load(Ordering::Acquire),
            rate_per_second: state.rate.get(),
        }
    }

    /// Worker split of the active epoch, if any.
    pub fn active_plan(&self) -> Option<WorkerPlan> {
        self.control.read().epoch.as_ref().map(Epoch::plan)
    }

    /// Worker tasks currently alive, including ones from superseded epochs
    /// that have not yet observed cancellation.
    pub fn live_workers(&self) -> usize {
        self.ctx.live_workers.load(Ordering::Acquire)
    }

    /// Stops the generator and waits up to `grace` for the active epoch's
    /// workers to exit. Returns `false` if the grace period ran out.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        let epoch = {
            let mut state = self.control.write();
            state.running = false;
            state.epoch.take()
        };

        let Some(epoch) = epoch else {
            return true;
        };

        let seq = epoch.seq();
        let drained = epoch.drain(grace).await;
        let total_logs = self.ctx.emitted.load(Ordering::Acquire);

        if drained {
            info!(epoch = seq, total_logs, "log generation shut down");
        } else {
            warn!(
                epoch = seq,
                grace_ms = u64::try_from(grace.as_millis()).unwrap_or(u64::MAX),
                "emission workers still running after shutdown grace period"
            );
        }
        drained
    }

    fn start_locked(&self, state: &mut ControlState, rate: Rate) -> Result<StartOutcome> {
        if state.running {
            debug!(rate_per_second = state.rate.get(), "start ignored, already running");
            return Ok(StartOutcome::AlreadyRunning {
                rate: state.rate.get(),
            });
        }

        let runtime = current_runtime()?;
        self.ctx.emitted.store(0, Ordering::Release);
        let epoch = self.launch(&runtime, state, rate);
        let seq = epoch.seq();

        state.epoch = Some(epoch);
        state.running = true;
        state.rate = rate;

        info!(rate_per_second = rate.get(), epoch = seq, "log generation started");
        Ok(StartOutcome::Started {
            rate: rate.get(),
            epoch: seq,
        })
    }

    fn launch(&self, runtime: &Handle, state: &mut ControlState, rate: Rate) -> Epoch {
        state.next_seq += 1;
        let epoch = Epoch::launch(runtime, state.next_seq, rate, self.workers, &self.ctx);
        let plan = epoch.plan();

        info!(
            epoch = epoch.seq(),
            rate_per_second = epoch.rate().get(),
            num_workers = plan.workers,
            logs_per_worker = plan.per_worker_rate,
            interval_us = u64::try_from(plan.interval.as_micros()).unwrap_or(u64::MAX),
            "launching emission workers"
        );
        epoch
    }
}

fn current_runtime() -> Result<Handle> {
    Handle::try_current().map_err(|_| GeneratorError::NoRuntime)
}
