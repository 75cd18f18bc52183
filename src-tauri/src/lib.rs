//! Notefold Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: Tauri command handlers

use std::path::PathBuf;
use tauri::{Emitter, Manager};

mod commands;
mod domain;
mod repository;

use repository::{open_and_migrate, DbState, NodeRepository, WorkspaceRepository};

/// Application state shared across commands
pub struct AppState {
    pub node_repo: NodeRepository,
    pub workspace_repo: WorkspaceRepository,
}

/// Get database path from app handle
fn get_db_path(app_handle: &tauri::AppHandle) -> Result<PathBuf, String> {
    let app_dir = app_handle
        .path()
        .app_data_dir()
        .map_err(|e| format!("failed to resolve app data dir: {}", e))?;
    std::fs::create_dir_all(&app_dir).map_err(|e| e.to_string())?;
    Ok(app_dir.join("notefold.db"))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt::init();

    tauri::Builder::default()
        .setup(|app| {
            let app_handle = app.handle().clone();
            let db_path = get_db_path(&app_handle)?;

            // Manage state immediately with an empty connection slot so the
            // window comes up without waiting on the database
            let db_state = DbState::new();
            app.manage(AppState {
                node_repo: NodeRepository::new(db_state.conn.clone()),
                workspace_repo: WorkspaceRepository::new(db_state.conn.clone()),
            });

            // Initialize the database in the background and tell the
            // frontend once commands can touch it
            tauri::async_runtime::spawn(async move {
                match open_and_migrate(&db_path) {
                    Ok(conn) => {
                        *db_state.conn.lock().await = Some(conn);
                        tracing::info!(path = %db_path.display(), "database initialized");
                        if let Err(e) = app_handle.emit("db-initialized", ()) {
                            tracing::error!("failed to emit db-initialized: {}", e);
                        }
                    }
                    Err(e) => tracing::error!("database init failed: {}", e),
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Nodes + structure
            commands::create_page,
            commands::create_folder,
            commands::rename_folder,
            commands::rename_page,
            commands::delete_node,
            commands::get_workspace_tree,
            commands::update_structure,
            // Workspaces
            commands::list_workspaces,
            commands::create_workspace,
            commands::rename_workspace,
            commands::delete_workspace,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
