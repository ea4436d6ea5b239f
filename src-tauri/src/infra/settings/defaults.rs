//! Usage: Canonical default settings document and well-known setting paths.

use serde_json::{json, Value};

pub const DEFAULT_THEME: &str = "dark";
pub const DEFAULT_FONT_FAMILY: &str = "system-ui";
pub const DEFAULT_FONT_SIZE: u32 = 14;
pub const DEFAULT_ACCENT_COLOR: &str = "#0078d4";
pub const DEFAULT_TITLEBAR_BUTTON_STYLE: &str = "windows";
pub const DEFAULT_WINDOW_STATE: &str = "normal";
pub const DEFAULT_WINDOW_WIDTH: u32 = 1000;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 700;

/// Dot-paths the host reacts to or reads directly.
pub mod keys {
    pub const APPEARANCE: &str = "appearance";
    pub const THEME: &str = "appearance.theme";
    pub const FONT_FAMILY: &str = "appearance.fontFamily";
    pub const FONT_SIZE: &str = "appearance.fontSize";
    pub const ACCENT_COLOR: &str = "appearance.accentColor";
    pub const TITLEBAR_BUTTON_STYLE: &str = "appearance.titlebarButtonStyle";

    pub const DEFAULT_WINDOW_STATE: &str = "behavior.defaultWindowState";
    pub const REMEMBER_WINDOW_SIZE: &str = "behavior.rememberWindowSize";
    pub const LAUNCH_ON_STARTUP: &str = "behavior.launchOnStartup";
    pub const START_MINIMIZED_TO_TRAY: &str = "behavior.startMinimizedToTray";
    pub const MINIMIZE_TO_TRAY: &str = "behavior.minimizeToTray";
    pub const CLOSE_TO_TRAY: &str = "behavior.closeToTray";
    pub const ALWAYS_ON_TOP: &str = "behavior.alwaysOnTop";

    pub const KEYBOARD_SHORTCUTS: &str = "advanced.keyboardShortcuts";

    pub const WINDOW_WIDTH: &str = "window.width";
    pub const WINDOW_HEIGHT: &str = "window.height";
    pub const WINDOW_X: &str = "window.x";
    pub const WINDOW_Y: &str = "window.y";
}

pub fn default_document() -> Value {
    json!({
        "appearance": {
            "theme": DEFAULT_THEME,
            "fontFamily": DEFAULT_FONT_FAMILY,
            "fontSize": DEFAULT_FONT_SIZE,
            "accentColor": DEFAULT_ACCENT_COLOR,
            "titlebarButtonStyle": DEFAULT_TITLEBAR_BUTTON_STYLE
        },
        "behavior": {
            "defaultWindowState": DEFAULT_WINDOW_STATE,
            "rememberWindowSize": true,
            "launchOnStartup": false,
            "startMinimizedToTray": false,
            "minimizeToTray": false,
            "closeToTray": true,
            "alwaysOnTop": false
        },
        "advanced": {
            "keyboardShortcuts": {
                "close": "CommandOrControl+Shift+Q",
                "minimize": "CommandOrControl+Shift+M",
                "maximize": "CommandOrControl+Shift+X",
                "show": "CommandOrControl+Shift+S",
                "hide": "CommandOrControl+Shift+H"
            }
        },
        "window": {
            "width": DEFAULT_WINDOW_WIDTH,
            "height": DEFAULT_WINDOW_HEIGHT,
            "x": null,
            "y": null
        }
    })
}
