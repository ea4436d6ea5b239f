//! Usage: Tauri-managed state types shared by `commands/*` and window/tray hooks.

use crate::app::events::MaximizeTracker;
use crate::settings::SettingsStore;
use crate::shortcuts::ShortcutRegistry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// The single settings store instance, created in `setup` and dropped on exit.
pub(crate) struct SettingsState(pub(crate) Mutex<SettingsStore>);

impl SettingsState {
    pub(crate) fn new(store: SettingsStore) -> Self {
        Self(Mutex::new(store))
    }
}

#[derive(Default)]
pub(crate) struct ShortcutState(pub(crate) Mutex<ShortcutRegistry>);

#[derive(Default)]
pub(crate) struct WindowTrackerState(pub(crate) Mutex<MaximizeTracker>);

#[derive(Default)]
pub(crate) struct SplashState {
    revealed: AtomicBool,
}

impl SplashState {
    /// True exactly once: the first caller performs the splash → main handoff.
    pub(crate) fn claim_reveal(&self) -> bool {
        !self.revealed.swap(true, Ordering::SeqCst)
    }

    pub(crate) fn is_revealed(&self) -> bool {
        self.revealed.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LaunchOptions {
    pub(crate) dev: bool,
}
