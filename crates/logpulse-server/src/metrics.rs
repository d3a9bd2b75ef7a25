//! Prometheus exposition of generator state
//!
//! Gauges live in a registry owned by the server (no process-wide default
//! registry) and are refreshed from a status snapshot on every scrape.

use logpulse_core::StatusSnapshot;
use prometheus::{Encoder, IntGauge, Registry, TextEncoder};

pub struct GeneratorMetrics {
    registry: Registry,
    running: IntGauge,
    total_logs: IntGauge,
    rate: IntGauge,
    live_workers: IntGauge,
}

impl GeneratorMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let running = IntGauge::new(
            "logpulse_generator_running",
            "1 while log generation is active",
        )?;
        let total_logs = IntGauge::new(
            "logpulse_generated_logs",
            "Logs emitted since generation was last started",
        )?;
        let rate = IntGauge::new(
            "logpulse_rate_per_second",
            "Target aggregate emission rate",
        )?;
        let live_workers = IntGauge::new(
            "logpulse_live_workers",
            "Emission worker tasks currently alive",
        )?;

        registry.register(Box::new(running.clone()))?;
        registry.register(Box::new(total_logs.clone()))?;
        registry.register(Box::new(rate.clone()))?;
        registry.register(Box::new(live_workers.clone()))?;

        Ok(Self {
            registry,
            running,
            total_logs,
            rate,
            live_workers,
        })
    }

    /// Updates the gauges and renders the text exposition format.
    pub fn render(&self, status: StatusSnapshot, live_workers: usize) -> prometheus::Result<String> {
        self.running.set(i64::from(status.is_running));
        self.total_logs
            .set(i64::try_from(status.total_logs).unwrap_or(i64::MAX));
        self.rate.set(i64::from(status.rate_per_second));
        self.live_workers
            .set(i64::try_from(live_workers).unwrap_or(i64::MAX));

        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
