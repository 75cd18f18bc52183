//! Structure Command
//!
//! The core's primary egress call: one full-replace batch per gesture,
//! applied by the backend as a single transaction.

use serde::Serialize;

use super::try_invoke;
use crate::models::StructureUpdate;

#[derive(Serialize)]
struct UpdateStructureArgs<'a> {
    updates: &'a [StructureUpdate],
}

pub async fn update_structure(updates: &[StructureUpdate]) -> Result<(), String> {
    let js_args =
        serde_wasm_bindgen::to_value(&UpdateStructureArgs { updates }).map_err(|e| e.to_string())?;
    match try_invoke("update_structure", js_args).await {
        Ok(_) => Ok(()),
        Err(e) => Err(e
            .as_string()
            .unwrap_or_else(|| format!("update_structure rejected: {:?}", e))),
    }
}
