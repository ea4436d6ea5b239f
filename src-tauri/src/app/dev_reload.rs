//! Usage: `--dev` live reload of `settings.json` edited outside the app.
//!
//! Watches the settings directory (editors often save through a rename) and reloads once a burst
//! of events has been quiet for [`DEBOUNCE`], then pushes the result to the presentation layer.

use crate::app::app_state::SettingsState;
use crate::app::effects::{self, TauriHostControls};
use crate::app::events::{self, HostEvent};
use crate::app::live_apply;
use crate::shared::mutex_ext::MutexExt;
use notify::{Config as NotifyConfig, Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tauri::Manager;

const DEBOUNCE: Duration = Duration::from_millis(250);
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Keeps the watcher alive for the lifetime of the app.
pub(crate) struct DevReloadState {
    _watcher: Mutex<Box<dyn Watcher + Send>>,
}

fn is_settings_event(event: &Event, file_name: &OsStr) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|f| f == file_name))
}

/// Trailing-edge debounce: every event takes a ticket and only the newest ticket reloads.
#[derive(Debug, Default)]
struct Debounce {
    latest: AtomicU64,
}

impl Debounce {
    fn ticket(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

fn reload(app: &tauri::AppHandle) {
    let changed = {
        let state = app.state::<SettingsState>();
        let mut store = state.0.lock_or_recover();
        let changed = store.reload();
        if changed.is_some() {
            effects::apply_document(&store, &TauriHostControls::new(app));
        }
        changed
    };

    let Some(doc) = changed else {
        return;
    };
    events::emit(app, HostEvent::SettingsChanged(doc));
    live_apply::push(app);
}

fn make_handler(
    app: tauri::AppHandle,
    file_name: OsString,
) -> impl Fn(notify::Result<Event>) + Send + 'static {
    let debounce = Arc::new(Debounce::default());
    move |result| {
        let event = match result {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!("settings watcher error: {}", err);
                return;
            }
        };
        if !is_settings_event(&event, &file_name) {
            return;
        }
        let ticket = debounce.ticket();
        let debounce = Arc::clone(&debounce);
        let app = app.clone();
        tauri::async_runtime::spawn(async move {
            tokio::time::sleep(DEBOUNCE).await;
            if debounce.is_latest(ticket) {
                reload(&app);
            } else {
                tracing::trace!("settings reload superseded by a later event");
            }
        });
    }
}

fn create_watcher(
    app: &tauri::AppHandle,
    file_name: &OsStr,
) -> Result<Box<dyn Watcher + Send>, String> {
    match notify::recommended_watcher(make_handler(app.clone(), file_name.to_os_string())) {
        Ok(watcher) => Ok(Box::new(watcher)),
        Err(err) => {
            tracing::warn!(
                "native file watcher unavailable ({}); falling back to polling",
                err
            );
            PollWatcher::new(
                make_handler(app.clone(), file_name.to_os_string()),
                NotifyConfig::default().with_poll_interval(POLL_INTERVAL),
            )
            .map(|watcher| Box::new(watcher) as Box<dyn Watcher + Send>)
            .map_err(|e| format!("failed to create poll watcher: {e}"))
        }
    }
}

/// Start watching `settings_path` and keep the watcher in managed state.
pub(crate) fn start(app: &tauri::AppHandle, settings_path: &Path) -> Result<(), String> {
    let file_name = settings_path
        .file_name()
        .ok_or_else(|| format!("settings path has no file name: {}", settings_path.display()))?;
    let dir = settings_path
        .parent()
        .ok_or_else(|| format!("settings path has no parent: {}", settings_path.display()))?;

    let mut watcher = create_watcher(app, file_name)?;
    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .map_err(|e| format!("failed to watch {}: {e}", dir.display()))?;

    app.manage(DevReloadState {
        _watcher: Mutex::new(watcher),
    });
    tracing::info!(path = %settings_path.display(), "dev live reload enabled");
    Ok(())
}
