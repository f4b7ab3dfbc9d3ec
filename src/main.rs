//! Trendsea binary entrypoint kept minimal. The full runtime lives in `app`.

mod ai;
mod app;
mod args;
mod countries;
mod events;
mod logic;
mod snapshot;
mod sources;
mod state;
mod theme;
mod ui;
mod util;

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

struct TrendseaTimer;

impl tracing_subscriber::fmt::time::FormatTime for TrendseaTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now()
            .format("%Y-%m-%d-T%H:%M:%S")
            .to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

fn init_logging(level: &str) {
    let mut log_path = crate::theme::logs_dir();
    log_path.push("trendsea.log");
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(TrendseaTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: stderr logger so startup never blocks on the log file.
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(true)
                .with_timer(TrendseaTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args.log_level);
    tracing::info!(offline = args.offline, "Trendsea starting");
    if let Err(err) = app::run(args).await {
        tracing::error!(error = ?err, "Application error");
    }
    tracing::info!("Trendsea exited");
}
