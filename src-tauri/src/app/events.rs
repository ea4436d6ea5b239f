//! Host → presentation notifications.
//!
//! Every one-directional message goes through [`emit`]; event names live only in
//! [`HostEvent::name`].

use crate::appearance::AppliedStyle;
use serde::Serialize;
use serde_json::{json, Value};
use tauri::Emitter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    Settings,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    WindowMaximized,
    WindowUnmaximized,
    Navigate(Page),
    AppearanceApply(AppliedStyle),
    SettingsChanged(Value),
}

impl HostEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::WindowMaximized => "window:maximized",
            HostEvent::WindowUnmaximized => "window:unmaximized",
            HostEvent::Navigate(_) => "app:navigate",
            HostEvent::AppearanceApply(_) => "appearance:apply",
            HostEvent::SettingsChanged(_) => "settings:changed",
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            HostEvent::WindowMaximized | HostEvent::WindowUnmaximized => Value::Null,
            HostEvent::Navigate(page) => json!({ "page": page }),
            HostEvent::AppearanceApply(style) => {
                serde_json::to_value(style).unwrap_or(Value::Null)
            }
            HostEvent::SettingsChanged(doc) => doc.clone(),
        }
    }
}

pub(crate) fn emit(app: &tauri::AppHandle, event: HostEvent) {
    let name = event.name();
    if let Err(err) = app.emit(name, event.payload()) {
        tracing::warn!(event = name, "failed to emit host event: {}", err);
    }
}

/// Turns raw "is the window maximized now?" observations into at most one notification per
/// transition. Resize events fire repeatedly while the state stays the same.
#[derive(Debug, Default)]
pub struct MaximizeTracker {
    maximized: bool,
}

impl MaximizeTracker {
    pub fn observe(&mut self, maximized: bool) -> Option<HostEvent> {
        if self.maximized == maximized {
            return None;
        }
        self.maximized = maximized;
        Some(if maximized {
            HostEvent::WindowMaximized
        } else {
            HostEvent::WindowUnmaximized
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_reports_each_transition_once() {
        let mut tracker = MaximizeTracker::default();
        assert_eq!(tracker.observe(false), None);
        assert_eq!(tracker.observe(true), Some(HostEvent::WindowMaximized));
        assert_eq!(tracker.observe(true), None);
        assert_eq!(tracker.observe(true), None);
        assert_eq!(tracker.observe(false), Some(HostEvent::WindowUnmaximized));
        assert_eq!(tracker.observe(false), None);
    }

    #[test]
    fn navigate_payload_carries_page_id() {
        let event = HostEvent::Navigate(Page::Settings);
        assert_eq!(event.name(), "app:navigate");
        assert_eq!(event.payload(), json!({ "page": "settings" }));
    }

    #[test]
    fn event_names_are_distinct() {
        let names = [
            HostEvent::WindowMaximized.name(),
            HostEvent::WindowUnmaximized.name(),
            HostEvent::Navigate(Page::Home).name(),
            HostEvent::SettingsChanged(Value::Null).name(),
        ];
        let unique: std::collections::BTreeSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }
}
