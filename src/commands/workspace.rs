//! Workspace Commands
//!
//! Frontend bindings for workspace-related backend commands.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::invoke;
use crate::models::Workspace;

#[derive(Serialize)]
struct NameArgs<'a> {
    name: &'a str,
}

pub async fn list_workspaces() -> Result<Vec<Workspace>, String> {
    let result = invoke("list_workspaces", JsValue::NULL).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn create_workspace(name: &str) -> Result<Workspace, String> {
    let js_args = serde_wasm_bindgen::to_value(&NameArgs { name }).map_err(|e| e.to_string())?;
    let result = invoke("create_workspace", js_args).await;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
