//! Tauri Commands for Folders, Pages and Structure
//!
//! Exposes node operations to the frontend via Tauri IPC.

use tauri::State;

use crate::domain::{build_workspace_tree, DomainError, Node, NodeKind, StructureUpdate, WorkspaceTree};
use crate::repository::{Repository, StructureOperations};
use crate::AppState;

/// Resolve an optional parent id, requiring it to name a folder.
async fn require_folder(state: &State<'_, AppState>, id: u32) -> Result<Node, String> {
    let node = state
        .node_repo
        .find_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| DomainError::NotFound(format!("Folder {} not found", id)).to_string())?;
    if node.kind != NodeKind::Folder {
        return Err(DomainError::InvalidInput(format!("Node {} is not a folder", id)).to_string());
    }
    Ok(node)
}

/// Create an untitled page, appended at the end of the folder (or root)
#[tauri::command]
pub async fn create_page(
    state: State<'_, AppState>,
    workspace_id: u32,
    folder_id: Option<u32>,
) -> Result<Node, String> {
    if let Some(fid) = folder_id {
        require_folder(&state, fid).await?;
    }
    let page = Node::new_page(workspace_id, "Untitled".to_string(), folder_id);
    let created = state.node_repo.create(&page).await.map_err(|e| e.to_string())?;
    tracing::info!(id = created.id, workspace_id, "created page");
    Ok(created)
}

/// Create an empty folder, appended at the end of the parent (or root)
#[tauri::command]
pub async fn create_folder(
    state: State<'_, AppState>,
    workspace_id: u32,
    parent_id: Option<u32>,
    name: String,
) -> Result<Node, String> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidInput("Folder name must not be empty".to_string()).to_string());
    }
    if let Some(pid) = parent_id {
        require_folder(&state, pid).await?;
    }
    let folder = Node::new_folder(workspace_id, name, parent_id);
    let created = state.node_repo.create(&folder).await.map_err(|e| e.to_string())?;
    tracing::info!(id = created.id, workspace_id, "created folder");
    Ok(created)
}

/// Rename a folder in place
#[tauri::command]
pub async fn rename_folder(
    state: State<'_, AppState>,
    folder_id: u32,
    name: String,
) -> Result<Node, String> {
    let mut folder = require_folder(&state, folder_id).await?;
    folder.name = name;
    state.node_repo.update(&folder).await.map_err(|e| e.to_string())
}

/// Rename a page in place. Pages are created untitled; this is how an
/// editor surface gives them a title later.
#[tauri::command]
pub async fn rename_page(
    state: State<'_, AppState>,
    page_id: u32,
    name: String,
) -> Result<Node, String> {
    let mut page = state
        .node_repo
        .find_by_id(page_id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| DomainError::NotFound(format!("Page {} not found", page_id)).to_string())?;
    if page.kind != NodeKind::Page {
        return Err(DomainError::InvalidInput(format!("Node {} is not a page", page_id)).to_string());
    }
    page.name = name;
    state.node_repo.update(&page).await.map_err(|e| e.to_string())
}

/// Delete a page or folder (cascades folder subtrees)
#[tauri::command]
pub async fn delete_node(state: State<'_, AppState>, id: u32) -> Result<(), String> {
    state.node_repo.delete(id).await.map_err(|e| e.to_string())
}

/// The nested hydration payload for one workspace
#[tauri::command]
pub async fn get_workspace_tree(
    state: State<'_, AppState>,
    workspace_id: u32,
) -> Result<WorkspaceTree, String> {
    let nodes = state
        .node_repo
        .list_by_workspace(workspace_id)
        .await
        .map_err(|e| e.to_string())?;
    Ok(build_workspace_tree(nodes))
}

/// Apply a full-replace structure batch as one transaction
#[tauri::command]
pub async fn update_structure(
    state: State<'_, AppState>,
    updates: Vec<StructureUpdate>,
) -> Result<(), String> {
    match state.node_repo.apply_structure(&updates).await {
        Ok(()) => {
            tracing::debug!(records = updates.len(), "applied structure batch");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "rejected structure batch");
            Err(e.to_string())
        }
    }
}
