//! Usage: Best-effort cleanup hooks for app lifecycle events (exit).

use crate::app::hotkeys;
use std::sync::atomic::{AtomicBool, Ordering};

static CLEANUP_STARTED: AtomicBool = AtomicBool::new(false);

/// Release OS-wide resources before the process goes away. Runs at most once.
pub(crate) fn cleanup_before_exit(app: &tauri::AppHandle) {
    if CLEANUP_STARTED.swap(true, Ordering::SeqCst) {
        return;
    }

    hotkeys::release_all(app);
    tracing::info!("exit cleanup finished");
}
