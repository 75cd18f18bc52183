//! Node Commands
//!
//! Frontend bindings for folder/page backend commands.

use serde::Serialize;

use super::{invoke, try_invoke};
use crate::models::{Node, WorkspaceTree};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
pub struct CreatePageArgs {
    #[serde(rename = "workspaceId")]
    pub workspace_id: u32,
    #[serde(rename = "folderId")]
    pub folder_id: Option<u32>,
}

#[derive(Serialize)]
pub struct CreateFolderArgs<'a> {
    #[serde(rename = "workspaceId")]
    pub workspace_id: u32,
    #[serde(rename = "parentId")]
    pub parent_id: Option<u32>,
    pub name: &'a str,
}

#[derive(Serialize)]
struct IdArgs {
    id: u32,
}

#[derive(Serialize)]
struct RenameFolderArgs<'a> {
    #[serde(rename = "folderId")]
    folder_id: u32,
    name: &'a str,
}

#[derive(Serialize)]
struct WorkspaceIdArgs {
    #[serde(rename = "workspaceId")]
    workspace_id: u32,
}

// ========================
// Commands
// ========================

pub async fn create_page(args: &CreatePageArgs) -> Result<Node, String> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke("create_page", js_args).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn create_folder(args: &CreateFolderArgs<'_>) -> Result<Node, String> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke("create_folder", js_args).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn rename_folder(folder_id: u32, name: &str) -> Result<Node, String> {
    let js_args = serde_wasm_bindgen::to_value(&RenameFolderArgs { folder_id, name })
        .map_err(|e| e.to_string())?;
    let result = invoke("rename_folder", js_args).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Deleting must be observed: a rejected delete must not cascade locally.
pub async fn delete_node(id: u32) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(|e| e.to_string())?;
    match try_invoke("delete_node", js_args).await {
        Ok(_) => Ok(()),
        Err(e) => Err(e
            .as_string()
            .unwrap_or_else(|| format!("delete_node rejected: {:?}", e))),
    }
}

pub async fn get_workspace_tree(workspace_id: u32) -> Result<WorkspaceTree, String> {
    let js_args =
        serde_wasm_bindgen::to_value(&WorkspaceIdArgs { workspace_id }).map_err(|e| e.to_string())?;
    let result = invoke("get_workspace_tree", js_args).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
