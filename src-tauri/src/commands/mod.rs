//! Usage: Tauri command handlers exposed to the presentation layer.

mod app;
mod settings;
mod window;

pub(crate) use app::*;
pub(crate) use settings::*;
pub(crate) use window::*;
