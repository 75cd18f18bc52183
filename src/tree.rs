//! Tree Model
//!
//! Arena-style in-memory model of one workspace's folder/page tree.
//! Nodes live in a flat id map; each folder keeps an explicit ordered list
//! of child ids, so moves are index splices instead of deep rewrites.

use std::collections::HashMap;

use crate::models::{FolderTree, Node, NodeKind, StructureUpdate, WorkspaceTree};

/// One row of the flattened tree: the node plus its depth (root = 0) and
/// its index among siblings at flatten time. Ephemeral, recomputed on every
/// tree change, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatItem {
    pub node: Node,
    pub depth: usize,
    pub index: usize,
}

/// The authoritative in-memory tree for the current workspace view.
///
/// Cloning is cheap enough that speculative drag states work on a clone and
/// the committed model stays untouched until the gesture commits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeModel {
    nodes: HashMap<u32, Node>,
    /// Ordered child ids per folder. An empty vec is meaningful: the folder
    /// exists and has no children (it gets an empty-drop placeholder).
    children: HashMap<u32, Vec<u32>>,
    /// Ordered root-level ids.
    roots: Vec<u32>,
}

impl TreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the model from the nested hydration payload.
    pub fn hydrate(tree: &WorkspaceTree) -> Self {
        let mut model = Self::new();
        let mut root_entries: Vec<(i32, &Node)> = Vec::new();
        for ft in &tree.folders {
            root_entries.push((ft.folder.position, &ft.folder));
        }
        for page in &tree.pages {
            root_entries.push((page.position, page));
        }
        root_entries.sort_by_key(|(pos, node)| (*pos, node.id));

        for (_, node) in &root_entries {
            model.nodes.insert(node.id, (*node).clone());
            model.roots.push(node.id);
            if node.kind == NodeKind::Folder {
                model.children.insert(node.id, Vec::new());
            }
        }
        for ft in &tree.folders {
            model.hydrate_folder(ft);
        }
        model.renumber_all();
        model
    }

    fn hydrate_folder(&mut self, ft: &FolderTree) {
        let mut entries: Vec<(i32, &Node)> = Vec::new();
        for sub in &ft.folders {
            entries.push((sub.folder.position, &sub.folder));
        }
        for page in &ft.pages {
            entries.push((page.position, page));
        }
        entries.sort_by_key(|(pos, node)| (*pos, node.id));

        let mut ids = Vec::with_capacity(entries.len());
        for (_, node) in &entries {
            self.nodes.insert(node.id, (*node).clone());
            ids.push(node.id);
            if node.kind == NodeKind::Folder {
                self.children.insert(node.id, Vec::new());
            }
        }
        self.children.insert(ft.folder.id, ids);
        for sub in &ft.folders {
            self.hydrate_folder(sub);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Lookup by id. Misses are routine (stale pointer targets), never an error.
    pub fn find(&self, id: u32) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// The ordered sibling ids under a parent (`None` = root level).
    pub fn sibling_ids(&self, parent: Option<u32>) -> &[u32] {
        match parent {
            None => &self.roots,
            Some(pid) => self.children.get(&pid).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// Locate the sibling list that directly contains `id`: returns the
    /// parent id (`None` = root) and the node's index within that list.
    pub fn parent_list(&self, id: u32) -> Option<(Option<u32>, usize)> {
        let node = self.nodes.get(&id)?;
        let parent = node.parent_id;
        let index = self.sibling_ids(parent).iter().position(|&c| c == id)?;
        Some((parent, index))
    }

    /// True if `id` sits somewhere below `ancestor` (strict: a node is not
    /// its own descendant).
    pub fn is_descendant(&self, ancestor: u32, id: u32) -> bool {
        let mut current = self.nodes.get(&id).and_then(|n| n.parent_id);
        while let Some(pid) = current {
            if pid == ancestor {
                return true;
            }
            current = self.nodes.get(&pid).and_then(|n| n.parent_id);
        }
        false
    }

    /// Append a freshly created node at the end of its parent's sibling list.
    pub fn insert(&mut self, node: Node) {
        let parent = node.parent_id;
        if node.kind == NodeKind::Folder {
            self.children.entry(node.id).or_default();
        }
        let id = node.id;
        self.nodes.insert(id, node);
        match parent {
            None => self.roots.push(id),
            Some(pid) => self.children.entry(pid).or_default().push(id),
        }
        self.renumber(parent);
    }

    pub fn rename(&mut self, id: u32, name: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.name = name.to_string();
        }
    }

    /// Detach `id` from its sibling list, compacting the list. The node (and
    /// its subtree) stays in the arena so it can be re-inserted elsewhere.
    pub fn detach(&mut self, id: u32) -> bool {
        let Some((parent, index)) = self.parent_list(id) else {
            return false;
        };
        match parent {
            None => {
                self.roots.remove(index);
            }
            Some(pid) => {
                if let Some(list) = self.children.get_mut(&pid) {
                    list.remove(index);
                }
            }
        }
        self.renumber(parent);
        true
    }

    /// Insert a detached node into `parent`'s sibling list at `index`
    /// (clamped to the list length).
    pub fn insert_at(&mut self, id: u32, parent: Option<u32>, index: usize) {
        let len = self.sibling_ids(parent).len();
        let index = index.min(len);
        match parent {
            None => self.roots.insert(index, id),
            Some(pid) => self.children.entry(pid).or_default().insert(index, id),
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent_id = parent;
        }
        self.renumber(parent);
    }

    /// Append a detached node at the end of `parent`'s sibling list.
    pub fn attach_end(&mut self, id: u32, parent: Option<u32>) {
        let len = self.sibling_ids(parent).len();
        self.insert_at(id, parent, len);
    }

    /// Deep-remove a node and, for folders, its entire subtree.
    /// Returns the removed node itself, or None if it was never here.
    pub fn remove(&mut self, id: u32) -> Option<Node> {
        if !self.contains(id) {
            return None;
        }
        self.detach(id);
        let mut doomed = vec![id];
        let mut i = 0;
        while i < doomed.len() {
            if let Some(kids) = self.children.remove(&doomed[i]) {
                doomed.extend(kids);
            }
            i += 1;
        }
        let mut removed = None;
        for did in doomed {
            let node = self.nodes.remove(&did);
            if did == id {
                removed = node;
            }
        }
        removed
    }

    /// Depth-first flatten, parent before children, sibling order preserved.
    /// Deterministic: the same tree always yields the same sequence.
    pub fn flatten(&self) -> Vec<FlatItem> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.flatten_into(None, 0, &mut out);
        out
    }

    fn flatten_into(&self, parent: Option<u32>, depth: usize, out: &mut Vec<FlatItem>) {
        let ids: Vec<u32> = self.sibling_ids(parent).to_vec();
        for (index, id) in ids.iter().enumerate() {
            if let Some(node) = self.nodes.get(id) {
                out.push(FlatItem {
                    node: node.clone(),
                    depth,
                    index,
                });
                if node.kind == NodeKind::Folder {
                    self.flatten_into(Some(*id), depth + 1, out);
                }
            }
        }
    }

    /// Walk the whole tree assigning contiguous order per sibling list and
    /// emit one full-replace record per node.
    pub fn structure_updates(&self) -> Vec<StructureUpdate> {
        self.flatten()
            .into_iter()
            .map(|flat| StructureUpdate {
                id: flat.node.id,
                kind: flat.node.kind,
                parent_id: flat.node.parent_id,
                order: flat.index as i32,
            })
            .collect()
    }

    /// Re-nest the arena into the hydration payload shape.
    pub fn to_workspace_tree(&self) -> WorkspaceTree {
        WorkspaceTree {
            folders: self
                .sibling_ids(None)
                .iter()
                .filter_map(|&id| self.folder_tree(id))
                .collect(),
            pages: self
                .sibling_ids(None)
                .iter()
                .filter_map(|&id| self.nodes.get(&id))
                .filter(|n| n.kind == NodeKind::Page)
                .cloned()
                .collect(),
        }
    }

    fn folder_tree(&self, id: u32) -> Option<FolderTree> {
        let folder = self.nodes.get(&id)?;
        if folder.kind != NodeKind::Folder {
            return None;
        }
        let kids = self.sibling_ids(Some(id));
        Some(FolderTree {
            folder: folder.clone(),
            folders: kids.iter().filter_map(|&c| self.folder_tree(c)).collect(),
            pages: kids
                .iter()
                .filter_map(|&c| self.nodes.get(&c))
                .filter(|n| n.kind == NodeKind::Page)
                .cloned()
                .collect(),
        })
    }

    /// Rewrite stored positions for one sibling list to 0..n-1.
    fn renumber(&mut self, parent: Option<u32>) {
        let ids: Vec<u32> = self.sibling_ids(parent).to_vec();
        for (pos, id) in ids.iter().enumerate() {
            if let Some(node) = self.nodes.get_mut(id) {
                node.position = pos as i32;
                node.parent_id = parent;
            }
        }
    }

    fn renumber_all(&mut self) {
        self.renumber(None);
        let folder_ids: Vec<u32> = self.children.keys().copied().collect();
        for fid in folder_ids {
            self.renumber(Some(fid));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: u32, parent_id: Option<u32>, position: i32) -> Node {
        Node {
            id,
            workspace_id: 1,
            name: format!("Folder {}", id),
            kind: NodeKind::Folder,
            parent_id,
            position,
        }
    }

    fn page(id: u32, parent_id: Option<u32>, position: i32) -> Node {
        Node {
            id,
            workspace_id: 1,
            name: format!("Page {}", id),
            kind: NodeKind::Page,
            parent_id,
            position,
        }
    }

    /// roots: F1, P2; F1 children: P3, F4; F4 children: P5
    fn sample_tree() -> TreeModel {
        let dto = WorkspaceTree {
            folders: vec![FolderTree {
                folder: folder(1, None, 0),
                folders: vec![FolderTree {
                    folder: folder(4, Some(1), 1),
                    folders: vec![],
                    pages: vec![page(5, Some(4), 0)],
                }],
                pages: vec![page(3, Some(1), 0)],
            }],
            pages: vec![page(2, None, 1)],
        };
        TreeModel::hydrate(&dto)
    }

    fn assert_contiguous(model: &TreeModel) {
        let mut lists: Vec<Option<u32>> = vec![None];
        lists.extend(
            model
                .flatten()
                .iter()
                .filter(|f| f.node.kind == NodeKind::Folder)
                .map(|f| Some(f.node.id)),
        );
        for parent in lists {
            for (i, id) in model.sibling_ids(parent).iter().enumerate() {
                let node = model.find(*id).unwrap();
                assert_eq!(node.position, i as i32, "position gap under {:?}", parent);
                assert_eq!(node.parent_id, parent);
            }
        }
    }

    #[test]
    fn test_flatten_order_and_depth() {
        let model = sample_tree();
        let flat = model.flatten();
        let ids: Vec<u32> = flat.iter().map(|f| f.node.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5, 2]);
        let depths: Vec<usize> = flat.iter().map(|f| f.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 2, 0]);
        assert_eq!(flat[4].index, 1); // P2 is second root
    }

    #[test]
    fn test_hydrate_round_trip() {
        let model = sample_tree();
        let rebuilt = TreeModel::hydrate(&model.to_workspace_tree());
        assert_eq!(model, rebuilt);
    }

    #[test]
    fn test_detach_compacts_siblings() {
        let mut model = sample_tree();
        assert!(model.detach(3));
        assert_contiguous(&model);
        // F4 moved up to index 0 under F1
        assert_eq!(model.sibling_ids(Some(1)), &[4]);
        assert_eq!(model.find(4).unwrap().position, 0);
        // node 3 still in the arena, just unlisted
        assert!(model.contains(3));
    }

    #[test]
    fn test_insert_at_reparents() {
        let mut model = sample_tree();
        model.detach(3);
        model.insert_at(3, None, 0);
        assert_eq!(model.sibling_ids(None), &[3, 1, 2]);
        assert_eq!(model.find(3).unwrap().parent_id, None);
        assert_contiguous(&model);
    }

    #[test]
    fn test_remove_cascades_folder_subtree() {
        let mut model = sample_tree();
        let removed = model.remove(1).expect("folder removed");
        assert_eq!(removed.id, 1);
        for gone in [1, 3, 4, 5] {
            assert!(!model.contains(gone), "node {} should be gone", gone);
        }
        assert_eq!(model.sibling_ids(None), &[2]);
        assert_contiguous(&model);
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut model = sample_tree();
        assert!(model.remove(999).is_none());
        assert_eq!(model.len(), 5);
    }

    #[test]
    fn test_is_descendant() {
        let model = sample_tree();
        assert!(model.is_descendant(1, 5));
        assert!(model.is_descendant(4, 5));
        assert!(!model.is_descendant(5, 1));
        assert!(!model.is_descendant(1, 1), "a node is not its own descendant");
        assert!(!model.is_descendant(1, 2));
    }

    #[test]
    fn test_structure_updates_cover_whole_tree() {
        let model = sample_tree();
        let batch = model.structure_updates();
        assert_eq!(batch.len(), model.len());
        // every parent in the batch is a folder record in the same batch
        for update in &batch {
            if let Some(pid) = update.parent_id {
                assert!(batch
                    .iter()
                    .any(|u| u.id == pid && u.kind == NodeKind::Folder));
            }
        }
    }

    #[test]
    fn test_insert_appends_at_end() {
        let mut model = sample_tree();
        model.insert(page(6, Some(1), 0));
        assert_eq!(model.sibling_ids(Some(1)), &[3, 4, 6]);
        assert_eq!(model.find(6).unwrap().position, 2);
        assert_contiguous(&model);
    }
}
