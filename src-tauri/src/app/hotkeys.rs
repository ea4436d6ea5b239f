//! Usage: Wire the shortcut registry to `tauri-plugin-global-shortcut` and window actions.

use crate::app::app_state::{SettingsState, ShortcutState};
use crate::resident;
use crate::shared::mutex_ext::MutexExt;
use crate::shortcuts::{self, GlobalShortcutBackend, RefreshReport, ShortcutAction};
use tauri::Manager;
use tauri_plugin_global_shortcut::{Shortcut, ShortcutEvent, ShortcutState as KeyState};

pub(crate) fn plugin() -> tauri::plugin::TauriPlugin<tauri::Wry> {
    tauri_plugin_global_shortcut::Builder::new()
        .with_handler(
            |app: &tauri::AppHandle, shortcut: &Shortcut, event: ShortcutEvent| {
                if event.state() == KeyState::Pressed {
                    on_pressed(app, shortcut);
                }
            },
        )
        .build()
}

/// Re-bind every global accelerator from the current settings document.
pub(crate) fn refresh(app: &tauri::AppHandle) -> RefreshReport {
    let wanted = {
        let state = app.state::<SettingsState>();
        let store = state.0.lock_or_recover();
        shortcuts::wanted_from_store(&store)
    };

    let state = app.state::<ShortcutState>();
    let mut registry = state.0.lock_or_recover();
    registry.refresh(&mut GlobalShortcutBackend::new(app), &wanted)
}

pub(crate) fn release_all(app: &tauri::AppHandle) {
    let state = app.state::<ShortcutState>();
    let mut registry = state.0.lock_or_recover();
    registry.clear(&mut GlobalShortcutBackend::new(app));
}

fn on_pressed(app: &tauri::AppHandle, pressed: &Shortcut) {
    let action = {
        let state = app.state::<ShortcutState>();
        let registry = state.0.lock_or_recover();
        registry
            .bindings()
            .iter()
            .find(|(_, accelerator)| {
                accelerator
                    .parse::<Shortcut>()
                    .is_ok_and(|shortcut| &shortcut == pressed)
            })
            .map(|(action, _)| *action)
    };

    match action {
        Some(action) => dispatch(app, action),
        None => tracing::debug!("global shortcut pressed without a bound action"),
    }
}

pub(crate) fn dispatch(app: &tauri::AppHandle, action: ShortcutAction) {
    tracing::debug!(action = action.as_str(), "global shortcut triggered");
    match action {
        ShortcutAction::Close => resident::close_main_window(app),
        ShortcutAction::Minimize => resident::minimize_main_window(app),
        ShortcutAction::Maximize => resident::toggle_maximize_main_window(app),
        ShortcutAction::Show => resident::show_main_window(app),
        ShortcutAction::Hide => resident::hide_main_window(app),
    }
}
