//! Tauri Command Handlers

mod node_cmd;
mod workspace_cmd;

pub use node_cmd::*;
pub use workspace_cmd::*;
