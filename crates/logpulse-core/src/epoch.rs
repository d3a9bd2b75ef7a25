//! Generation epochs: one worker pool running at one fixed rate.
//!
//! ```text
//!            Epoch (seq, rate, CancellationToken)
//!   ┌──────────────┬──────────────┬─────┬──────────────┐
//!   │  worker 0    │  worker 1    │ ... │  worker N-1  │
//!   │  tick/cancel │  tick/cancel │     │  tick/cancel │
//!   └──────┬───────┴──────┬───────┴─────┴──────┬───────┘
//!          ▼              ▼                    ▼
//!     RecordSource → EmissionSink → emitted counter (shared)
//! ```
//!
//! An epoch is cancelled exactly once, either explicitly or when it is
//! dropped. Workers observe the token cooperatively and never start a new
//! emission after seeing it.

use crate::rate::Rate;
use crate::record::RecordSource;
use crate::sink::EmissionSink;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, timeout_at};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Shortest interval a worker will tick at.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// How an aggregate rate is split across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPlan {
    pub workers: usize,
    pub per_worker_rate: u32,
    pub interval: Duration,
}

impl WorkerPlan {
    pub fn new(rate: Rate, workers: usize) -> Self {
        let workers = workers.max(1);
        let divisor = u32::try_from(workers).unwrap_or(u32::MAX);
        let per_worker_rate = (rate.get() / divisor).max(1);
        let interval = (Duration::from_secs(1) / per_worker_rate).max(MIN_INTERVAL);

        Self {
            workers,
            per_worker_rate,
            interval,
        }
    }

    /// Rate the pool actually produces after integer division.
    pub fn effective_rate(&self) -> u64 {
        self.workers as u64 * u64::from(self.per_worker_rate)
    }
}

/// Everything a worker needs besides its own id and schedule.
#[derive(Clone)]
pub(crate) struct EmissionContext {
    pub(crate) source: Arc<dyn RecordSource>,
    pub(crate) sink: Arc<dyn EmissionSink>,
    pub(crate) emitted: Arc<AtomicU64>,
    pub(crate) live_workers: Arc<AtomicUsize>,
}

pub(crate) struct Epoch {
    seq: u64,
    rate: Rate,
    plan: WorkerPlan,
    token: CancellationToken,
    workers: Vec<JoinHandle<()>>,
}

impl Epoch {
    /// Spawns the worker set on `runtime` and returns at once.
    pub(crate) fn launch(
        runtime: &Handle,
        seq: u64,
        rate: Rate,
        workers: usize,
        ctx: &EmissionContext,
    ) -> Self {
        let plan = WorkerPlan::new(rate, workers);
        let token = CancellationToken::new();

        let handles = (0..plan.workers)
            .map(|worker_id| {
                ctx.live_workers.fetch_add(1, Ordering::AcqRel);
                let guard = LiveWorker(Arc::clone(&ctx.live_workers));
                let ctx = ctx.clone();
                let token = token.clone();
                let interval = plan.interval;

                runtime.spawn(async move {
                    let _guard = guard;
                    run_worker(seq, worker_id, interval, token, ctx).await;
                })
            })
            .collect();

        Self {
            seq,
            rate,
            plan,
            token,
            workers: handles,
        }
    }

    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }

    pub(crate) fn rate(&self) -> Rate {
        self.rate
    }

    pub(crate) fn plan(&self) -> WorkerPlan {
        self.plan
    }

    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancels and waits up to `grace` for the workers to exit.
    ///
    /// Returns `false` if any worker was still running at the deadline; those
    /// workers are left detached.
    pub(crate) async fn drain(mut self, grace: Duration) -> bool {
        self.cancel();
        let deadline = Instant::now() + grace;

        for handle in std::mem::take(&mut self.workers) {
            if timeout_at(deadline, handle).await.is_err() {
                return false;
            }
        }
        true
    }
}

impl Drop for Epoch {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Decrements the live worker count when a worker task ends, however it ends.
struct LiveWorker(Arc<AtomicUsize>);

impl Drop for LiveWorker {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

async fn run_worker(
    epoch: u64,
    worker_id: usize,
    period: Duration,
    token: CancellationToken,
    ctx: EmissionContext,
) {
    // First emission happens one period after launch, not immediately.
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                let record = ctx.source.next_record(worker_id);
                ctx.sink.emit(&record);
                ctx.emitted.fetch_add(1, Ordering::AcqRel);
            }
        }
    }

    trace!(epoch, worker_id, "emission worker exited");
}
