mod app;
mod cli;
mod commands;
mod domain;
mod infra;
mod shared;

pub(crate) use app::{app_state, resident};
pub(crate) use domain::appearance;
pub(crate) use infra::{app_paths, settings, shortcuts};

use app::{cleanup, dev_reload, effects, hotkeys, live_apply, logging, splash};
use app_state::{
    LaunchOptions, SettingsState, ShortcutState, SplashState, WindowTrackerState,
};
use commands::*;
use settings::SettingsStore;
use shared::mutex_ext::MutexExt;
use tauri::Manager;

pub fn run() {
    let args = cli::parse();
    let options = LaunchOptions { dev: args.dev };

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            resident::show_main_window(app);
        }))
        .plugin(tauri_plugin_autostart::Builder::new().build())
        .plugin(hotkeys::plugin())
        .plugin(tauri_plugin_dialog::init())
        .manage(ShortcutState::default())
        .manage(WindowTrackerState::default())
        .manage(SplashState::default())
        .manage(options)
        .on_window_event(resident::on_window_event)
        .setup(move |app| {
            let handle = app.handle();
            logging::init(handle, options.dev);
            if let Some(ignored) = &args.ignored {
                tracing::warn!("ignoring unrecognized arguments: {}", ignored);
            }

            let path = settings::settings_path(handle)?;
            app.manage(SettingsState::new(SettingsStore::load(path.clone())));

            splash::create_windows(handle)?;
            {
                let state = handle.state::<SettingsState>();
                let store = state.0.lock_or_recover();
                effects::apply_document(&store, &effects::TauriHostControls::new(handle));
            }

            if let Err(err) = resident::setup_tray(handle) {
                tracing::error!("failed to set up tray: {}", err);
            }
            hotkeys::refresh(handle);
            live_apply::push(handle);
            splash::schedule_fallback(handle);

            if options.dev {
                if let Err(err) = dev_reload::start(handle, &path) {
                    tracing::error!("failed to start settings live reload: {}", err);
                }
            }

            tracing::info!(settings = %path.display(), "desktop shell started");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            settings_get,
            settings_set,
            settings_restore_defaults,
            settings_export,
            shortcuts_refresh,
            splash_complete,
            appearance_get,
            window_minimize,
            window_toggle_maximize,
            window_close,
            app_about_get,
            app_exit
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| match event {
        tauri::RunEvent::ExitRequested { .. } | tauri::RunEvent::Exit => {
            cleanup::cleanup_before_exit(app_handle);
        }
        #[cfg(target_os = "macos")]
        tauri::RunEvent::Reopen {
            has_visible_windows: false,
            ..
        } => resident::show_main_window(app_handle),
        _ => {}
    });
}
