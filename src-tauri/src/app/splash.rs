//! Usage: Splash → main window handoff (window creation, reveal plan, fallback timer).

use crate::app::app_state::{LaunchOptions, SettingsState, SplashState};
use crate::resident::MAIN_WINDOW_LABEL;
use crate::settings::{keys, SettingsStore};
use crate::shared::mutex_ext::MutexExt;
use std::time::Duration;
use tauri::Manager;

pub(crate) const SPLASH_WINDOW_LABEL: &str = "splash";
/// Reveal the main window anyway if the splash page never acknowledges.
const SPLASH_FALLBACK: Duration = Duration::from_secs(10);

/// Windows are declared with `create: false` so commands can rely on managed state; build them
/// here once the store exists.
pub(crate) fn create_windows(app: &tauri::AppHandle) -> Result<(), String> {
    let configs = app.config().app.windows.clone();
    for config in configs.iter().filter(|c| !c.create) {
        tauri::WebviewWindowBuilder::from_config(app, config)
            .and_then(|builder| builder.build())
            .map_err(|e| format!("failed to create window {}: {e}", config.label))?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RevealPlan {
    pub(crate) size: Option<(f64, f64)>,
    pub(crate) position: Option<(f64, f64)>,
    pub(crate) maximize: bool,
    pub(crate) show: bool,
}

impl RevealPlan {
    pub(crate) fn from_store(store: &SettingsStore) -> Self {
        let remember = store.bool_at(keys::REMEMBER_WINDOW_SIZE);
        let size = match (
            store.f64_at(keys::WINDOW_WIDTH),
            store.f64_at(keys::WINDOW_HEIGHT),
        ) {
            (Some(w), Some(h)) if remember && w > 0.0 && h > 0.0 => Some((w, h)),
            _ => None,
        };
        let position = match (store.f64_at(keys::WINDOW_X), store.f64_at(keys::WINDOW_Y)) {
            (Some(x), Some(y)) if remember => Some((x, y)),
            _ => None,
        };

        Self {
            size,
            position,
            maximize: store.str_at(keys::DEFAULT_WINDOW_STATE) == "maximized",
            show: !store.bool_at(keys::START_MINIMIZED_TO_TRAY),
        }
    }
}

/// Close the splash and reveal the main window. Returns `false` when the handoff already ran.
pub(crate) fn finish(app: &tauri::AppHandle) -> bool {
    if !app.state::<SplashState>().claim_reveal() {
        return false;
    }

    if let Some(splash) = app.get_webview_window(SPLASH_WINDOW_LABEL) {
        if let Err(err) = splash.close() {
            tracing::warn!("failed to close splash window: {}", err);
        }
    }

    let plan = {
        let state = app.state::<SettingsState>();
        let store = state.0.lock_or_recover();
        RevealPlan::from_store(&store)
    };
    tracing::debug!(?plan, "revealing main window");

    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        tracing::error!("main window missing at splash handoff");
        return true;
    };

    if let Some((width, height)) = plan.size {
        let _ = window.set_size(tauri::LogicalSize::new(width, height));
    }
    if let Some((x, y)) = plan.position {
        let _ = window.set_position(tauri::LogicalPosition::new(x, y));
    }
    if plan.maximize {
        let _ = window.maximize();
    }
    if plan.show {
        let _ = window.show();
        let _ = window.set_focus();
    }
    if app.state::<LaunchOptions>().dev {
        window.open_devtools();
    }
    true
}

pub(crate) fn schedule_fallback(app: &tauri::AppHandle) {
    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(SPLASH_FALLBACK).await;
        if finish(&app) {
            tracing::warn!(
                "splash not acknowledged within {}s; revealed main window",
                SPLASH_FALLBACK.as_secs()
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SETTINGS_FILE_NAME;
    use crate::shared::fs::unique_tmp_dir;
    use serde_json::json;

    fn store(tag: &str) -> (std::path::PathBuf, SettingsStore) {
        let dir = unique_tmp_dir(tag);
        let store = SettingsStore::load(dir.join(SETTINGS_FILE_NAME));
        (dir, store)
    }

    #[test]
    fn default_plan_restores_size_and_shows() {
        let (dir, store) = store("splash-default");

        let plan = RevealPlan::from_store(&store);

        assert_eq!(plan.size, Some((1000.0, 700.0)));
        assert_eq!(plan.position, None);
        assert!(!plan.maximize);
        assert!(plan.show);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn remembered_geometry_is_ignored_when_disabled() {
        let (dir, mut store) = store("splash-forget");
        store
            .set_many([
                (keys::WINDOW_X, json!(40)),
                (keys::WINDOW_Y, json!(60)),
                (keys::REMEMBER_WINDOW_SIZE, json!(false)),
            ])
            .expect("set_many");

        let plan = RevealPlan::from_store(&store);

        assert_eq!(plan.size, None);
        assert_eq!(plan.position, None);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn maximized_and_tray_start_are_honored() {
        let (dir, mut store) = store("splash-tray");
        store
            .set_many([
                (keys::DEFAULT_WINDOW_STATE, json!("maximized")),
                (keys::START_MINIMIZED_TO_TRAY, json!(true)),
                (keys::WINDOW_X, json!(40)),
                (keys::WINDOW_Y, json!(60)),
            ])
            .expect("set_many");

        let plan = RevealPlan::from_store(&store);

        assert!(plan.maximize);
        assert!(!plan.show);
        assert_eq!(plan.position, Some((40.0, 60.0)));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
