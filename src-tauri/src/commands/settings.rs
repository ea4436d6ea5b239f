//! Usage: Settings bridge commands (read/write/restore/export, shortcut refresh).

use crate::app::effects::{self, SideEffect, TauriHostControls};
use crate::app::events::{self, HostEvent};
use crate::app::{hotkeys, live_apply};
use crate::app_state::SettingsState;
use crate::settings::ExportOutcome;
use crate::shared::mutex_ext::MutexExt;
use crate::shortcuts::RefreshReport;
use serde_json::Value;
use std::path::PathBuf;
use tauri::Manager;
use tauri_plugin_dialog::DialogExt;

/// Full document, or the value at a dot-path (`null` when neither set nor defaulted).
#[tauri::command]
pub(crate) fn settings_get(state: tauri::State<'_, SettingsState>, path: Option<String>) -> Value {
    let store = state.0.lock_or_recover();
    store.get(path.as_deref()).unwrap_or(Value::Null)
}

/// Returns whether the write reached disk; malformed input is an error.
#[tauri::command]
pub(crate) fn settings_set(
    app: tauri::AppHandle,
    state: tauri::State<'_, SettingsState>,
    path: String,
    value: Value,
) -> Result<bool, String> {
    let outcome = {
        let mut store = state.0.lock_or_recover();
        effects::set_and_apply(&mut store, &TauriHostControls::new(&app), &path, value)
            .map_err(|e| format!("SEC_INVALID_INPUT: {e}"))?
    };

    if outcome.effect == Some(SideEffect::Appearance) {
        live_apply::push(&app);
    }
    Ok(outcome.ack.persisted)
}

#[tauri::command]
pub(crate) fn settings_restore_defaults(
    app: tauri::AppHandle,
    state: tauri::State<'_, SettingsState>,
) -> Value {
    let doc = {
        let mut store = state.0.lock_or_recover();
        let doc = store.restore_defaults();
        effects::apply_document(&store, &TauriHostControls::new(&app));
        doc
    };

    live_apply::push(&app);
    events::emit(&app, HostEvent::SettingsChanged(doc.clone()));
    doc
}

fn pick_export_path(app: &tauri::AppHandle) -> Result<Option<PathBuf>, String> {
    let Some(picked) = app
        .dialog()
        .file()
        .set_title("Export settings")
        .add_filter("JSON", &["json"])
        .set_file_name("settings.json")
        .blocking_save_file()
    else {
        return Ok(None);
    };

    picked
        .into_path()
        .map(Some)
        .map_err(|e| format!("failed to resolve export path: {e}"))
}

#[tauri::command]
pub(crate) async fn settings_export(app: tauri::AppHandle) -> ExportOutcome {
    let picker_app = app.clone();
    let picked = tauri::async_runtime::spawn_blocking(move || pick_export_path(&picker_app))
        .await
        .map_err(|e| format!("export dialog task failed: {e}"))
        .and_then(|picked| picked);

    let destination = match picked {
        Ok(destination) => destination,
        Err(err) => {
            tracing::warn!("settings export failed: {}", err);
            return ExportOutcome::failed(err);
        }
    };

    let state = app.state::<SettingsState>();
    let store = state.0.lock_or_recover();
    store.export(destination.as_deref())
}

#[tauri::command]
pub(crate) fn shortcuts_refresh(app: tauri::AppHandle) -> RefreshReport {
    hotkeys::refresh(&app)
}
