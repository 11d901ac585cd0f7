// Prevents additional console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod commands;

use commands::{
    documents::*, materials::*, navigation::*, photos::*, projects::*, timeline::*, views::*,
    visits::*,
};
use sitedesk::config::{AppConfig, AppState, CONFIG_FILE};
use sitedesk::logging;
use sitedesk::store::{ProjectStore, StoreChange, StoreWatcher};
use std::path::PathBuf;
use tauri::{AppHandle, Emitter, Manager};
use tokio::sync::broadcast::error::RecvError;

fn get_config_dir(handle: &AppHandle) -> PathBuf {
    handle
        .path()
        .app_config_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Reloads on external rewrites of the store and tells the frontend.
fn forward_store_changes(handle: AppHandle) {
    let Some(state) = handle.try_state::<AppState>() else {
        log::error!("App state missing, store changes will not be forwarded");
        return;
    };
    let mut changes = state.store.subscribe();
    tauri::async_runtime::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(StoreChange::External) => {
                    let state = handle.state::<AppState>();
                    match state.reload() {
                        Ok(count) => {
                            log::info!("Reloaded {} projects after external change", count);
                            if let Err(e) = handle.emit("projects-changed", StoreChange::External) {
                                log::warn!("Failed to emit projects-changed: {}", e);
                            }
                        }
                        Err(e) => log::error!("Failed to reload projects: {}", e),
                    }
                }
                Ok(StoreChange::Saved) => {}
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Store change feed lagged by {} messages", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

fn main() {
    logging::init();
    log::info!("SiteDesk starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::new().build())
        .setup(|app| {
            let config = AppConfig::load(&get_config_dir(app.handle()).join(CONFIG_FILE));
            log::info!("Project store at {}", config.store_path().display());

            let state = AppState::new(config)?;
            let watcher = StoreWatcher::new(state.store.clone(), state.config.watch_interval());
            app.manage(state);

            forward_store_changes(app.handle().clone());
            tauri::async_runtime::spawn(watcher.run());

            #[cfg(debug_assertions)]
            {
                if let Some(window) = app.get_webview_window("main") {
                    window.open_devtools();
                }
            }

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Projects
            list_projects,
            get_project,
            create_project,
            update_project,
            rename_project,
            set_project_status,
            delete_project,

            // Timeline
            add_phase,
            update_phase,
            remove_phase,
            add_milestone,
            remove_milestone,
            add_task,
            update_task,
            remove_task,

            // Documents
            pick_document_file,
            add_document,
            update_document,
            remove_document,

            // Photos and annotation
            pick_photo,
            begin_annotation,
            annotation_style,
            annotation_pointer,
            annotation_undo,
            annotation_clear,
            annotation_preview,
            cancel_annotation,
            save_annotated_photo,
            remove_photo,

            // Materials
            get_materials_overview,
            get_project_materials,
            add_material,
            update_material,
            delete_material,
            set_materials_budget,

            // Visits
            get_visits_overview,
            get_project_visits,
            schedule_visit,
            delete_visit,

            // Dashboard and reports
            get_dashboard,
            get_aggregate_report,
            get_project_report,

            // Navigation
            get_navigation,
            select_section,
            select_project,
            show_overview,
            select_tab,
            clear_navigation,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
