//! Tauri Commands for Workspaces

use tauri::State;

use crate::domain::Workspace;
use crate::repository::Repository;
use crate::AppState;

#[tauri::command]
pub async fn list_workspaces(state: State<'_, AppState>) -> Result<Vec<Workspace>, String> {
    state.workspace_repo.list().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_workspace(state: State<'_, AppState>, name: String) -> Result<Workspace, String> {
    let ws = Workspace { id: 0, name };
    state.workspace_repo.create(&ws).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn rename_workspace(
    state: State<'_, AppState>,
    id: u32,
    name: String,
) -> Result<Workspace, String> {
    let ws = Workspace { id, name };
    state.workspace_repo.update(&ws).await.map_err(|e| e.to_string())
}

/// Delete a workspace together with all of its folders and pages
#[tauri::command]
pub async fn delete_workspace(state: State<'_, AppState>, id: u32) -> Result<(), String> {
    state.workspace_repo.delete(id).await.map_err(|e| e.to_string())
}
