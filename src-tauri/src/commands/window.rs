//! Usage: Titlebar, splash and appearance commands for the main window.

use crate::app::{live_apply, splash};
use crate::app_state::SettingsState;
use crate::appearance::AppliedStyle;
use crate::resident;
use crate::shared::mutex_ext::MutexExt;

#[tauri::command]
pub(crate) fn window_minimize(app: tauri::AppHandle) -> bool {
    resident::minimize_main_window(&app);
    true
}

#[tauri::command]
pub(crate) fn window_toggle_maximize(app: tauri::AppHandle) -> bool {
    resident::toggle_maximize_main_window(&app);
    true
}

#[tauri::command]
pub(crate) fn window_close(app: tauri::AppHandle) -> bool {
    resident::close_main_window(&app);
    true
}

#[tauri::command]
pub(crate) fn splash_complete(app: tauri::AppHandle) -> bool {
    if !splash::finish(&app) {
        tracing::debug!("splash_complete after reveal; ignoring");
    }
    true
}

#[tauri::command]
pub(crate) fn appearance_get(
    app: tauri::AppHandle,
    state: tauri::State<'_, SettingsState>,
) -> AppliedStyle {
    let store = state.0.lock_or_recover();
    live_apply::resolve_current(&app, &store)
}
