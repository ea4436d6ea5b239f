//! Usage: Infrastructure adapters (filesystem paths, settings persistence, OS hotkeys).

pub(crate) mod app_paths;
pub(crate) mod settings;
pub(crate) mod shortcuts;
