//! Domain primitives shared by every Notefold entity.
//!
//! Folders, pages and workspaces all live behind the same repository
//! abstraction; this module holds the id contract they share and the error
//! type every domain operation returns.

use serde::{Deserialize, Serialize};

/// Errors surfaced by domain operations. Commands flatten these to strings
/// at the IPC boundary, so the variants carry their message directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    InvalidInput(String),
    Conflict(String),
    Internal(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (prefix, msg) = match self {
            DomainError::NotFound(msg) => ("Not found", msg),
            DomainError::InvalidInput(msg) => ("Invalid input", msg),
            DomainError::Conflict(msg) => ("Conflict", msg),
            DomainError::Internal(msg) => ("Internal error", msg),
        };
        write!(f, "{}: {}", prefix, msg)
    }
}

impl std::error::Error for DomainError {}

/// Identity contract for rows the repositories manage.
///
/// `Node` and `Workspace` both key by a database-assigned `u32`, but the
/// repository layer depends only on this trait.
pub trait Entity: Sized + Send + Sync + Clone {
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    fn id(&self) -> Self::Id;
}
