//! Usage: Desktop resident mode (tray icon, main window lifecycle, geometry persistence).

use crate::app::app_state::{SettingsState, SplashState, WindowTrackerState};
use crate::app::events::{self, HostEvent, Page};
use crate::app::live_apply;
use crate::settings::keys;
use crate::shared::mutex_ext::MutexExt;
use serde_json::{json, Value};
use tauri::Manager;

pub const MAIN_WINDOW_LABEL: &str = "main";
const TRAY_ID: &str = "main-tray";
const TRAY_MENU_TOGGLE_ID: &str = "tray.toggle";
const TRAY_MENU_HOME_ID: &str = "tray.home";
const TRAY_MENU_SETTINGS_ID: &str = "tray.settings";
const TRAY_MENU_QUIT_ID: &str = "tray.quit";

fn setting_enabled(app: &tauri::AppHandle, path: &str) -> bool {
    let state = app.state::<SettingsState>();
    let store = state.0.lock_or_recover();
    store.bool_at(path)
}

/// Settings pairs for the last known (logical) window geometry.
pub(crate) fn geometry_pairs(width: f64, height: f64, x: f64, y: f64) -> [(&'static str, Value); 4] {
    [
        (keys::WINDOW_WIDTH, json!(width.round() as i64)),
        (keys::WINDOW_HEIGHT, json!(height.round() as i64)),
        (keys::WINDOW_X, json!(x.round() as i64)),
        (keys::WINDOW_Y, json!(y.round() as i64)),
    ]
}

pub fn show_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let _ = window.show();
    let _ = window.unminimize();
    let _ = window.set_focus();
}

pub fn hide_main_window(app: &tauri::AppHandle) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        let _ = window.hide();
    }
}

/// Minimize, or hide to the tray when `behavior.minimizeToTray` is on.
pub fn minimize_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    if setting_enabled(app, keys::MINIMIZE_TO_TRAY) {
        let _ = window.hide();
    } else {
        let _ = window.minimize();
    }
}

pub fn toggle_maximize_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    if window.is_maximized().unwrap_or(false) {
        let _ = window.unmaximize();
    } else {
        let _ = window.maximize();
    }
}

/// Request a close; `on_window_event` decides between hiding and quitting.
pub fn close_main_window(app: &tauri::AppHandle) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        let _ = window.close();
    }
}

fn toggle_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let is_visible = window.is_visible().unwrap_or(false);
    let is_minimized = window.is_minimized().unwrap_or(false);

    if !is_visible || is_minimized {
        show_main_window(app);
        return;
    }

    let _ = window.hide();
}

pub fn setup_tray(app: &tauri::AppHandle) -> Result<(), String> {
    use tauri::menu::{Menu, MenuItem, PredefinedMenuItem};
    use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};

    let toggle_item = MenuItem::with_id(app, TRAY_MENU_TOGGLE_ID, "Show/Hide", true, None::<&str>)
        .map_err(|e| format!("failed to create tray toggle menu item: {e}"))?;
    let home_item = MenuItem::with_id(app, TRAY_MENU_HOME_ID, "Home", true, None::<&str>)
        .map_err(|e| format!("failed to create tray home menu item: {e}"))?;
    let settings_item =
        MenuItem::with_id(app, TRAY_MENU_SETTINGS_ID, "Settings", true, None::<&str>)
            .map_err(|e| format!("failed to create tray settings menu item: {e}"))?;
    let quit_item = MenuItem::with_id(app, TRAY_MENU_QUIT_ID, "Quit", true, None::<&str>)
        .map_err(|e| format!("failed to create tray quit menu item: {e}"))?;
    let separator = PredefinedMenuItem::separator(app)
        .map_err(|e| format!("failed to create tray menu separator: {e}"))?;

    let menu = Menu::with_items(
        app,
        &[&toggle_item, &home_item, &settings_item, &separator, &quit_item],
    )
    .map_err(|e| format!("failed to create tray menu: {e}"))?;

    let toggle_id = toggle_item.id().clone();
    let home_id = home_item.id().clone();
    let settings_id = settings_item.id().clone();
    let quit_id = quit_item.id().clone();

    let icon = tauri::image::Image::from_bytes(include_bytes!("../../icons/32x32.png"))
        .map_err(|e| format!("failed to load tray icon: {e}"))?;

    TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon)
        .tooltip("Desktop Shell")
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(move |app, event| {
            if event.id == quit_id {
                app.exit(0);
                return;
            }
            if event.id == toggle_id {
                toggle_main_window(app);
                return;
            }
            let page = if event.id == home_id {
                Page::Home
            } else if event.id == settings_id {
                Page::Settings
            } else {
                return;
            };
            show_main_window(app);
            events::emit(app, HostEvent::Navigate(page));
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button,
                button_state,
                ..
            } = event
            {
                if button == MouseButton::Left && button_state == MouseButtonState::Up {
                    show_main_window(tray.app_handle());
                }
            }
        })
        .build(app)
        .map_err(|e| format!("failed to build tray icon: {e}"))?;

    Ok(())
}

fn persist_geometry(window: &tauri::Window) {
    let app = window.app_handle();
    if !app.state::<SplashState>().is_revealed() {
        return;
    }

    let (Ok(size), Ok(position), Ok(scale)) = (
        window.inner_size(),
        window.outer_position(),
        window.scale_factor(),
    ) else {
        return;
    };
    let size = size.to_logical::<f64>(scale);
    let position = position.to_logical::<f64>(scale);
    if size.width <= 0.0 || size.height <= 0.0 {
        return;
    }

    let state = app.state::<SettingsState>();
    let mut store = state.0.lock_or_recover();
    if !store.bool_at(keys::REMEMBER_WINDOW_SIZE) {
        return;
    }
    let pairs = geometry_pairs(size.width, size.height, position.x, position.y);
    if let Err(err) = store.set_many(pairs) {
        tracing::warn!("failed to record window geometry: {}", err);
    }
}

fn on_resized_or_moved(window: &tauri::Window, resized: bool) {
    let app = window.app_handle();
    let maximized = window.is_maximized().unwrap_or(false);
    let minimized = window.is_minimized().unwrap_or(false);

    if resized {
        let change = {
            let tracker = app.state::<WindowTrackerState>();
            let mut tracker = tracker.0.lock_or_recover();
            tracker.observe(maximized)
        };
        if let Some(event) = change {
            events::emit(app, event);
        }
    }

    if minimized {
        if setting_enabled(app, keys::MINIMIZE_TO_TRAY) {
            let _ = window.hide();
        }
        return;
    }

    if !maximized && window.is_visible().unwrap_or(false) {
        persist_geometry(window);
    }
}

pub fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }

    match event {
        tauri::WindowEvent::CloseRequested { api, .. } => {
            if setting_enabled(window.app_handle(), keys::CLOSE_TO_TRAY) {
                api.prevent_close();
                let _ = window.hide();
            }
        }
        tauri::WindowEvent::Resized(_) => on_resized_or_moved(window, true),
        tauri::WindowEvent::Moved(_) => on_resized_or_moved(window, false),
        tauri::WindowEvent::ThemeChanged(theme) => {
            live_apply::on_os_theme_changed(window.app_handle(), *theme)
        }
        _ => {}
    }
}
