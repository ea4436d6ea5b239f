//! Usage: Global keyboard shortcut bindings (action → accelerator) and their (re)registration.
//!
//! Registration goes through [`ShortcutBackend`] so the rebinding rules can be exercised without
//! an OS hotkey service; the desktop build uses `tauri-plugin-global-shortcut`.

use crate::settings::{keys, SettingsStore};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortcutAction {
    Close,
    Minimize,
    Maximize,
    Show,
    Hide,
}

impl ShortcutAction {
    pub const ALL: [ShortcutAction; 5] = [
        ShortcutAction::Close,
        ShortcutAction::Minimize,
        ShortcutAction::Maximize,
        ShortcutAction::Show,
        ShortcutAction::Hide,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShortcutAction::Close => "close",
            ShortcutAction::Minimize => "minimize",
            ShortcutAction::Maximize => "maximize",
            ShortcutAction::Show => "show",
            ShortcutAction::Hide => "hide",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

pub trait ShortcutBackend {
    fn register(&mut self, accelerator: &str) -> Result<(), String>;
    fn unregister(&mut self, accelerator: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutBinding {
    pub action: ShortcutAction,
    pub accelerator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutFailure {
    pub action: ShortcutAction,
    pub accelerator: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub bound: Vec<ShortcutBinding>,
    pub failed: Vec<ShortcutFailure>,
}

/// Accelerators requested by the settings document. Unknown action names and non-string values
/// are skipped; an empty string leaves the action unbound.
pub fn wanted_from_store(store: &SettingsStore) -> BTreeMap<ShortcutAction, String> {
    let mut wanted = BTreeMap::new();
    for (name, value) in store.object_at(keys::KEYBOARD_SHORTCUTS) {
        let Some(action) = ShortcutAction::parse(&name) else {
            tracing::debug!(action = %name, "ignoring unknown shortcut action");
            continue;
        };
        let Some(accelerator) = value.as_str().map(str::trim) else {
            tracing::warn!(action = %name, "shortcut accelerator is not a string; skipping");
            continue;
        };
        if accelerator.is_empty() {
            continue;
        }
        wanted.insert(action, accelerator.to_string());
    }
    wanted
}

/// Currently registered accelerators, keyed by the action they trigger.
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    bound: BTreeMap<ShortcutAction, String>,
}

impl ShortcutRegistry {
    pub fn bindings(&self) -> &BTreeMap<ShortcutAction, String> {
        &self.bound
    }

    pub fn action_for(&self, accelerator: &str) -> Option<ShortcutAction> {
        self.bound
            .iter()
            .find(|(_, bound)| bound.eq_ignore_ascii_case(accelerator))
            .map(|(action, _)| *action)
    }

    /// Unregister every accelerator this registry holds.
    pub fn clear(&mut self, backend: &mut dyn ShortcutBackend) {
        for (action, accelerator) in std::mem::take(&mut self.bound) {
            if let Err(err) = backend.unregister(&accelerator) {
                tracing::warn!(
                    action = action.as_str(),
                    accelerator = %accelerator,
                    "failed to unregister shortcut: {}",
                    err
                );
            }
        }
    }

    /// Replace all bindings with `wanted`. A failing accelerator is logged and reported; the
    /// remaining ones are still registered.
    pub fn refresh(
        &mut self,
        backend: &mut dyn ShortcutBackend,
        wanted: &BTreeMap<ShortcutAction, String>,
    ) -> RefreshReport {
        self.clear(backend);

        let mut report = RefreshReport::default();
        for (action, accelerator) in wanted {
            if let Some(owner) = self.action_for(accelerator) {
                let error = format!("accelerator already bound to `{}`", owner.as_str());
                tracing::warn!(
                    action = action.as_str(),
                    accelerator = %accelerator,
                    "{}",
                    error
                );
                report.failed.push(ShortcutFailure {
                    action: *action,
                    accelerator: accelerator.clone(),
                    error,
                });
                continue;
            }

            match backend.register(accelerator) {
                Ok(()) => {
                    self.bound.insert(*action, accelerator.clone());
                    report.bound.push(ShortcutBinding {
                        action: *action,
                        accelerator: accelerator.clone(),
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        action = action.as_str(),
                        accelerator = %accelerator,
                        "failed to register shortcut: {}",
                        error
                    );
                    report.failed.push(ShortcutFailure {
                        action: *action,
                        accelerator: accelerator.clone(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            bound = report.bound.len(),
            failed = report.failed.len(),
            "global shortcuts refreshed"
        );
        report
    }
}

pub struct GlobalShortcutBackend<'a> {
    app: &'a tauri::AppHandle,
}

impl<'a> GlobalShortcutBackend<'a> {
    pub fn new(app: &'a tauri::AppHandle) -> Self {
        Self { app }
    }
}

impl ShortcutBackend for GlobalShortcutBackend<'_> {
    fn register(&mut self, accelerator: &str) -> Result<(), String> {
        use tauri_plugin_global_shortcut::GlobalShortcutExt;

        self.app
            .global_shortcut()
            .register(accelerator)
            .map_err(|e| format!("failed to register {accelerator}: {e}"))
    }

    fn unregister(&mut self, accelerator: &str) -> Result<(), String> {
        use tauri_plugin_global_shortcut::GlobalShortcutExt;

        self.app
            .global_shortcut()
            .unregister(accelerator)
            .map_err(|e| format!("failed to unregister {accelerator}: {e}"))
    }
}
