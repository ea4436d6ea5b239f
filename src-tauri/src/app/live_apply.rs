//! Usage: Push resolved appearance to the presentation layer (setting writes, OS theme changes).

use crate::app::app_state::SettingsState;
use crate::app::events::{self, HostEvent};
use crate::appearance::{self, AppearanceInput, AppliedStyle, ThemeChoice};
use crate::resident::MAIN_WINDOW_LABEL;
use crate::settings::SettingsStore;
use crate::shared::mutex_ext::MutexExt;
use tauri::Manager;

fn is_dark(theme: tauri::Theme) -> bool {
    matches!(theme, tauri::Theme::Dark)
}

/// OS color scheme as reported by the main window; dark when unknown.
pub(crate) fn os_prefers_dark(app: &tauri::AppHandle) -> bool {
    app.get_webview_window(MAIN_WINDOW_LABEL)
        .and_then(|window| window.theme().ok())
        .map(is_dark)
        .unwrap_or(true)
}

pub(crate) fn resolve_current(app: &tauri::AppHandle, store: &SettingsStore) -> AppliedStyle {
    appearance::resolve(&AppearanceInput::from_store(store), os_prefers_dark(app))
}

pub(crate) fn push(app: &tauri::AppHandle) {
    let style = {
        let state = app.state::<SettingsState>();
        let store = state.0.lock_or_recover();
        resolve_current(app, &store)
    };
    events::emit(app, HostEvent::AppearanceApply(style));
}

/// Re-resolve only while `auto` is selected; fixed themes do not follow the OS.
pub(crate) fn on_os_theme_changed(app: &tauri::AppHandle, theme: tauri::Theme) {
    let input = {
        let state = app.state::<SettingsState>();
        let store = state.0.lock_or_recover();
        AppearanceInput::from_store(&store)
    };
    if input.theme_choice() != ThemeChoice::Auto {
        return;
    }
    tracing::debug!(dark = is_dark(theme), "os theme changed; re-applying auto theme");
    let style = appearance::resolve(&input, is_dark(theme));
    events::emit(app, HostEvent::AppearanceApply(style));
}
