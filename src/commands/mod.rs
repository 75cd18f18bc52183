//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod node;
mod structure;
mod workspace;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> JsValue;

    /// Variant that surfaces command rejection instead of panicking.
    /// Used where the caller must react to failure (structure sync).
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"], js_name = invoke)]
    async fn try_invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use node::*;
pub use structure::*;
pub use workspace::*;
