//! Usage: Application layer (Tauri-managed state, tray/window lifecycle, startup wiring).

pub(crate) mod app_state;
pub(crate) mod cleanup;
pub(crate) mod dev_reload;
pub(crate) mod effects;
pub(crate) mod events;
pub(crate) mod hotkeys;
pub(crate) mod live_apply;
pub(crate) mod logging;
pub(crate) mod resident;
pub(crate) mod splash;
