//! Usage: Process-wide `tracing` setup (daily log file under the data dir, stdout in dev mode).

use crate::app_paths;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_PREFIX: &str = "desktop-shell.log";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn default_directive(dev: bool) -> &'static str {
    if dev {
        "debug"
    } else {
        "info"
    }
}

fn env_filter(dev: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(dev)))
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub(crate) fn init(app: &tauri::AppHandle, dev: bool) {
    if let Err(err) = tracing_log::LogTracer::init() {
        eprintln!("log bridge already installed: {err}");
    }

    let file_layer = match app_paths::logs_dir(app) {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(writer),
            )
        }
        Err(err) => {
            eprintln!("file logging disabled: {err}");
            None
        }
    };

    let console_layer = dev.then(|| fmt::layer().with_target(true));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter(dev))
        .with(file_layer)
        .with(console_layer);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        dev,
        "logging initialized"
    );
}
