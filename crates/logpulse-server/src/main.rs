//! logpulse - synthetic log traffic generator
//!
//! Usage:
//!   logpulse --port 8080 --rate 2000
//!   LOG_LEVEL=debug LOG_FILE_PATH=/tmp/gen.log logpulse

use anyhow::Context;
use clap::Parser;
use logpulse_core::{LogGenerator, TracingSink};
use logpulse_server::{AppState, Settings, create_router, logging};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();

    logging::init(settings.console_level(), &settings.log_file)
        .with_context(|| format!("failed to initialise logging to {}", settings.log_file.display()))?;

    info!(
        port = settings.port,
        log_level = %settings.console_level(),
        log_rate_per_second = settings.rate,
        workers = settings.workers,
        "starting server"
    );

    let generator = Arc::new(
        LogGenerator::new(Arc::new(TracingSink), settings.generator())
            .context("invalid generator configuration")?,
    );
    let state = Arc::new(AppState::new(Arc::clone(&generator)).context("failed to register metrics")?);
    let app = create_router(state, &settings.cors_origins);

    let addr = settings.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutting down server");
    if !generator.shutdown(settings.shutdown_grace()).await {
        warn!("some emission workers were still running at exit");
    }
    info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
