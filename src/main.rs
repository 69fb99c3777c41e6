use std::process::ExitCode;
use std::sync::{Arc, Mutex, PoisonError};

use ubmonitor::config::AppConfig;
use ubmonitor::dispatcher::Dispatcher;
use ubmonitor::probe::ProcfsProbe;
use ubmonitor::routes;
use ubmonitor::snapshot::SnapshotManager;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

/// Exit code for an unreadable or invalid config.
const EXIT_CONFIG: u8 = 1;
/// Exit code when the bus socket cannot be bound.
const EXIT_BUS_ATTACH: u8 = 2;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let socket_path = app_config.bus.socket_path.clone();
    let listener = match routes::bind(&socket_path) {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, socket = %socket_path, "failed to attach to bus");
            return ExitCode::from(EXIT_BUS_ATTACH);
        }
    };

    let probe = ProcfsProbe::new(&app_config.monitoring.procfs_root);
    let manager = SnapshotManager::new(
        Box::new(probe),
        app_config.monitoring.preserve_cpu_data,
    );
    let dispatcher = Arc::new(Mutex::new(Dispatcher::new(manager)));

    let app = routes::app(dispatcher.clone(), app_config.clone());
    tracing::info!(
        socket = %socket_path,
        object = %app_config.bus.object,
        preserve_cpu_data = app_config.monitoring.preserve_cpu_data,
        "bus object registered"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    dispatcher
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .manager_mut()
        .release();
    if let Err(e) = std::fs::remove_file(&socket_path) {
        tracing::debug!(error = %e, socket = %socket_path, "bus socket not removed");
    }

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "bus server failed");
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    let mut sigterm =
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Received shutdown signal");
                return;
            }
        };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
    tracing::info!("Received shutdown signal");
}
