//! Usage: App-level Tauri commands (about info, exit).

use crate::app_state::{LaunchOptions, SettingsState};
use crate::shared::mutex_ext::MutexExt;

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AppAboutInfo {
    name: String,
    app_version: String,
    os: String,
    arch: String,
    profile: &'static str,
    dev_mode: bool,
    settings_path: String,
}

#[tauri::command]
pub(crate) fn app_about_get(
    app: tauri::AppHandle,
    options: tauri::State<'_, LaunchOptions>,
    settings: tauri::State<'_, SettingsState>,
) -> AppAboutInfo {
    let settings_path = settings.0.lock_or_recover().path().display().to_string();
    let package = app.package_info();

    AppAboutInfo {
        name: package.name.clone(),
        app_version: package.version.to_string(),
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        profile: if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        dev_mode: options.dev,
        settings_path,
    }
}

/// Exit shortly after replying so the acknowledgment reaches the webview.
#[tauri::command]
pub(crate) fn app_exit(app: tauri::AppHandle) -> bool {
    std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(200));
        app.exit(0);
    });
    true
}
