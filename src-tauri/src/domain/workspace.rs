//! Workspace Entity

use super::entity::Entity;
use serde::{Deserialize, Serialize};

/// Top-level container holding folders and pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: u32,
    pub name: String,
}

impl Entity for Workspace {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
