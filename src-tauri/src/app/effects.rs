//! Usage: Host-side effects of individual setting writes (always-on-top, autostart, appearance).

use crate::settings::{keys, SettingsError, SettingsStore, WriteAck};
use serde_json::Value;

/// OS-facing operations a setting write may trigger.
pub(crate) trait HostControls {
    fn set_always_on_top(&self, enabled: bool) -> Result<(), String>;
    fn set_launch_on_startup(&self, enabled: bool) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SideEffect {
    AlwaysOnTop(bool),
    LaunchOnStartup(bool),
    /// Presentation needs a freshly resolved style.
    Appearance,
}

pub(crate) fn side_effect_for(path: &str, value: &Value) -> Option<SideEffect> {
    match path {
        keys::ALWAYS_ON_TOP => value.as_bool().map(SideEffect::AlwaysOnTop),
        keys::LAUNCH_ON_STARTUP => value.as_bool().map(SideEffect::LaunchOnStartup),
        _ if path
            .strip_prefix(keys::APPEARANCE)
            .is_some_and(|rest| rest.starts_with('.')) =>
        {
            Some(SideEffect::Appearance)
        }
        _ => None,
    }
}

fn apply(controls: &dyn HostControls, effect: SideEffect) {
    let result = match effect {
        SideEffect::AlwaysOnTop(enabled) => controls.set_always_on_top(enabled),
        SideEffect::LaunchOnStartup(enabled) => controls.set_launch_on_startup(enabled),
        SideEffect::Appearance => Ok(()),
    };
    if let Err(err) = result {
        tracing::warn!(?effect, "failed to apply setting side effect: {}", err);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SetOutcome {
    pub(crate) ack: WriteAck,
    pub(crate) effect: Option<SideEffect>,
}

/// Write one setting and immediately apply its OS-level side effect, if any. Shortcut paths have
/// none: re-binding waits for an explicit refresh.
pub(crate) fn set_and_apply(
    store: &mut SettingsStore,
    controls: &dyn HostControls,
    path: &str,
    value: Value,
) -> Result<SetOutcome, SettingsError> {
    let effect = side_effect_for(path, &value);
    let ack = store.set(path, value)?;
    if let Some(effect) = effect {
        apply(controls, effect);
    }
    Ok(SetOutcome { ack, effect })
}

/// Bring the OS in line with the whole document (startup, restore defaults, external reload).
pub(crate) fn apply_document(store: &SettingsStore, controls: &dyn HostControls) {
    apply(
        controls,
        SideEffect::AlwaysOnTop(store.bool_at(keys::ALWAYS_ON_TOP)),
    );
    apply(
        controls,
        SideEffect::LaunchOnStartup(store.bool_at(keys::LAUNCH_ON_STARTUP)),
    );
}

pub(crate) struct TauriHostControls<'a> {
    app: &'a tauri::AppHandle,
}

impl<'a> TauriHostControls<'a> {
    pub(crate) fn new(app: &'a tauri::AppHandle) -> Self {
        Self { app }
    }
}

impl HostControls for TauriHostControls<'_> {
    fn set_always_on_top(&self, enabled: bool) -> Result<(), String> {
        use tauri::Manager;

        let Some(window) = self.app.get_webview_window(crate::resident::MAIN_WINDOW_LABEL) else {
            return Ok(());
        };
        window
            .set_always_on_top(enabled)
            .map_err(|e| format!("failed to set always-on-top: {e}"))
    }

    fn set_launch_on_startup(&self, enabled: bool) -> Result<(), String> {
        use tauri_plugin_autostart::ManagerExt;

        let autolaunch = self.app.autolaunch();
        let current = autolaunch
            .is_enabled()
            .map_err(|e| format!("failed to query autostart: {e}"))?;
        if current == enabled {
            return Ok(());
        }
        if enabled {
            autolaunch
                .enable()
                .map_err(|e| format!("failed to enable autostart: {e}"))?;
        } else {
            autolaunch
                .disable()
                .map_err(|e| format!("failed to disable autostart: {e}"))?;
        }
        tracing::info!(enabled, "autostart updated");
        Ok(())
    }
}
