//! Sui Todo Backend
//!
//! Layered architecture:
//! - domain: Addresses, packages, todos and the mutation lifecycle
//! - ledger: Fullnode JSON-RPC client and keystore wallet
//! - services: Projection, module check, dispatcher and session
//! - repository: Settings persistence
//! - commands: Tauri command handlers

use std::path::PathBuf;
use tauri::Manager;
use tokio::sync::RwLock;

mod config;
mod domain;
mod ledger;
mod services;
mod repository;
mod commands;

use commands::ActiveSession;
use config::{AppConfig, CONFIG_FILE};
use repository::{init_db, SettingsRepository};

/// Application state shared across commands
pub struct AppState {
    pub config: AppConfig,
    pub settings: SettingsRepository,
    pub session: RwLock<Option<ActiveSession>>,
}

/// Get database path from app handle
fn get_db_path(app_handle: &tauri::AppHandle) -> Result<PathBuf, tauri::Error> {
    let app_dir = app_handle.path().app_data_dir()?;
    Ok(app_dir.join("sui_todo.db"))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|_app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = _app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            // Initialize logging
            rolling_logger::init_logger(app_handle.path().app_log_dir()?, "SuiTodo")?;

            let config_path = app_handle.path().app_config_dir()?.join(CONFIG_FILE);
            let config = AppConfig::load(&config_path).unwrap_or_else(|e| {
                let _ = rolling_logger::error(&format!("Bad config, using defaults: {}", e));
                AppConfig::default()
            });

            let db_path = get_db_path(&app_handle)?;
            log::info!("App setup starting, db at {}", db_path.display());
            let db_state = tauri::async_runtime::block_on(init_db(&db_path))?;
            let _ = rolling_logger::info("DB init success");

            app.manage(AppState {
                config,
                settings: SettingsRepository::new(db_state.connection()),
                session: RwLock::new(None),
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Session and settings
            commands::open_session,
            commands::session_info,
            commands::set_package_override,
            commands::clear_package_override,
            commands::set_network,
            commands::connect_wallet,
            commands::disconnect_wallet,
            commands::recent_logs,
            // Todos
            commands::list_todos,
            commands::check_module,
            commands::pending_mutation,
            commands::create_todo,
            commands::toggle_done,
            commands::update_text,
            commands::delete_todo,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
