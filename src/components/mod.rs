//! UI Components

mod new_node_form;
mod page_tree;
mod sync_status;
mod tree_row;
mod workspace_tab_bar;

pub use new_node_form::NewNodeForm;
pub use page_tree::PageTreeView;
pub use sync_status::SyncStatusChip;
pub use tree_row::TreeRow;
pub use workspace_tab_bar::WorkspaceTabBar;
