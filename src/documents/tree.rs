use log::debug;
use uuid::Uuid;

use std::collections::{HashMap, HashSet};

use super::data::*;
use super::selection::Selection;
use super::stats::{CategoryStats, ChecklistSummary};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryID),
    #[error("Item not found: {0}")]
    ItemNotFound(NodeID),
    #[error("Parent is not a folder in this category: {0}")]
    InvalidParent(NodeID),
    #[error("Item is not a document: {0}")]
    NotADocument(NodeID),
    #[error("Duplicate id: {0}")]
    DuplicateId(String),
}

pub type TreeResult<T> = Result<T, TreeError>;

#[derive(Debug, Clone)]
enum NodeKind {
    Folder { children: Vec<NodeID> },
    Document(Document),
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    category: CategoryID,
    parent: Option<NodeID>,
    kind: NodeKind,
}

#[derive(Debug, Clone)]
struct CategoryEntry {
    id: CategoryID,
    name: String,
    icon: String,
    required: u32,
    stats: CategoryStats,
    roots: Vec<NodeID>,
}

fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// The document room of one deal: categories, their folder/document forests
/// and the current selection.
///
/// Nodes live in a single id-indexed arena with parent links, so a node is
/// addressed by id alone no matter which category or depth it sits at. Every
/// mutator validates all of its lookups before touching the tree, so an `Err`
/// always means the tree is unchanged.
#[derive(Debug, Clone, Default)]
pub struct DocumentManager {
    categories: Vec<CategoryEntry>,
    nodes: HashMap<NodeID, Node>,
    document_nodes: HashMap<DocumentID, NodeID>,
    selection: Selection,
}

impl DocumentManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seeds(seeds: Vec<CategorySeed>) -> TreeResult<Self> {
        let mut manager = DocumentManager::new();

        for seed in seeds {
            let category_id = seed.id.unwrap_or_else(|| new_id("cat"));
            if manager.category_index(&category_id).is_ok() {
                return Err(TreeError::DuplicateId(category_id));
            }

            manager.categories.push(CategoryEntry {
                id: category_id.clone(),
                name: seed.name,
                icon: seed.icon,
                required: seed.required,
                stats: CategoryStats::compute(seed.required, std::iter::empty()),
                roots: vec![],
            });

            for item in seed.folder_structure {
                let root_id = manager.insert_seed_item(&category_id, None, item)?;
                let index = manager.category_index(&category_id)?;
                manager.categories[index].roots.push(root_id);
            }

            manager.update_category_stats(&category_id)?;
        }

        Ok(manager)
    }

    fn insert_seed_item(
        &mut self,
        category_id: &str,
        parent: Option<NodeID>,
        item: FolderItem,
    ) -> TreeResult<NodeID> {
        let id = item.id().to_string();
        if self.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateId(id));
        }

        match item {
            FolderItem::Folder { name, children, .. } => {
                self.nodes.insert(
                    id.clone(),
                    Node {
                        name,
                        category: category_id.to_string(),
                        parent,
                        kind: NodeKind::Folder { children: vec![] },
                    },
                );

                for child in children {
                    let child_id = self.insert_seed_item(category_id, Some(id.clone()), child)?;
                    if let Some(NodeKind::Folder { children }) =
                        self.nodes.get_mut(&id).map(|node| &mut node.kind)
                    {
                        children.push(child_id);
                    }
                }
            }
            FolderItem::Document { name, document, .. } => {
                if self.document_nodes.contains_key(&document.id) {
                    return Err(TreeError::DuplicateId(document.id));
                }
                self.document_nodes.insert(document.id.clone(), id.clone());
                self.nodes.insert(
                    id.clone(),
                    Node {
                        name: name.clone(),
                        category: category_id.to_string(),
                        parent,
                        kind: NodeKind::Document(Document { name, ..document }),
                    },
                );
            }
        }

        Ok(id)
    }

    fn category_index(&self, category_id: &str) -> TreeResult<usize> {
        self.categories
            .iter()
            .position(|category| category.id == category_id)
            .ok_or_else(|| TreeError::CategoryNotFound(category_id.to_string()))
    }

    fn node_in_category(&self, category_id: &str, item_id: &str) -> TreeResult<&Node> {
        self.category_index(category_id)?;

        match self.nodes.get(item_id) {
            Some(node) if node.category == category_id => Ok(node),
            _ => Err(TreeError::ItemNotFound(item_id.to_string())),
        }
    }

    /// Ids of the node and all of its descendants, parents before children.
    fn subtree(&self, node_id: &str) -> Vec<NodeID> {
        let mut stack = vec![node_id.to_string()];
        let mut ids = vec![];

        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                if let NodeKind::Folder { children } = &node.kind {
                    stack.extend(children.iter().rev().cloned());
                }
                ids.push(id);
            }
        }

        ids
    }

    fn count_documents(&self, ids: &[NodeID]) -> u32 {
        ids.iter()
            .filter(|id| {
                matches!(
                    self.nodes.get(*id).map(|node| &node.kind),
                    Some(NodeKind::Document(_))
                )
            })
            .count() as u32
    }

    fn resolve_parent(
        &self,
        category_id: &str,
        parent_id: Option<&str>,
    ) -> TreeResult<Option<NodeID>> {
        self.category_index(category_id)?;

        match parent_id {
            None => Ok(None),
            Some(parent_id) => match self.nodes.get(parent_id) {
                Some(Node {
                    category,
                    kind: NodeKind::Folder { .. },
                    ..
                }) if category == category_id => Ok(Some(parent_id.to_string())),
                _ => Err(TreeError::InvalidParent(parent_id.to_string())),
            },
        }
    }

    fn attach(&mut self, category_index: usize, parent: Option<&str>, node_id: NodeID) {
        match parent {
            Some(parent) => {
                if let Some(NodeKind::Folder { children }) =
                    self.nodes.get_mut(parent).map(|node| &mut node.kind)
                {
                    children.push(node_id);
                }
            }
            None => self.categories[category_index].roots.push(node_id),
        }
    }

    /// Unlinks a node from its parent folder or from its category's roots.
    fn detach(&mut self, node_id: &str) {
        let (parent, category) = match self.nodes.get(node_id) {
            Some(node) => (node.parent.clone(), node.category.clone()),
            None => return,
        };

        match parent {
            Some(parent) => {
                if let Some(NodeKind::Folder { children }) =
                    self.nodes.get_mut(&parent).map(|node| &mut node.kind)
                {
                    children.retain(|child| child != node_id);
                }
            }
            None => {
                if let Ok(index) = self.category_index(&category) {
                    self.categories[index].roots.retain(|root| root != node_id);
                }
            }
        }
    }

    fn remove_nodes(&mut self, ids: &[NodeID]) {
        for id in ids {
            if let Some(Node {
                kind: NodeKind::Document(document),
                ..
            }) = self.nodes.remove(id)
            {
                self.document_nodes.remove(&document.id);
            }
        }
    }

    pub fn create_category(&mut self, name: &str, icon: &str) -> CategoryID {
        let id = new_id("cat");

        self.categories.push(CategoryEntry {
            id: id.clone(),
            name: name.to_string(),
            icon: icon.to_string(),
            required: 0,
            stats: CategoryStats::compute(0, std::iter::empty()),
            roots: vec![],
        });
        debug!("Created category {} ({})", id, name);

        id
    }

    /// Removes the category and its whole forest. Selected ids of removed
    /// documents stay in the selection.
    pub fn delete_category(&mut self, category_id: &str) -> TreeResult<()> {
        let index = self.category_index(category_id)?;

        let ids: Vec<NodeID> = self.categories[index]
            .roots
            .iter()
            .flat_map(|root| self.subtree(root))
            .collect();
        self.remove_nodes(&ids);
        self.categories.remove(index);
        debug!("Deleted category {} with {} items", category_id, ids.len());

        Ok(())
    }

    pub fn rename_category(&mut self, category_id: &str, new_name: &str) -> TreeResult<()> {
        let index = self.category_index(category_id)?;
        self.categories[index].name = new_name.to_string();

        Ok(())
    }

    pub fn create_folder(
        &mut self,
        category_id: &str,
        parent_id: Option<&str>,
        name: &str,
    ) -> TreeResult<NodeID> {
        let parent = self.resolve_parent(category_id, parent_id)?;
        let index = self.category_index(category_id)?;
        let id = new_id("folder");

        self.nodes.insert(
            id.clone(),
            Node {
                name: name.to_string(),
                category: category_id.to_string(),
                parent: parent.clone(),
                kind: NodeKind::Folder { children: vec![] },
            },
        );
        self.attach(index, parent.as_deref(), id.clone());
        debug!("Created folder {} in {}", id, category_id);

        Ok(id)
    }

    /// Adds a pending document and raises the category's required count.
    pub fn create_document(
        &mut self,
        category_id: &str,
        parent_id: Option<&str>,
        name: &str,
        file_type: &str,
    ) -> TreeResult<NodeID> {
        let parent = self.resolve_parent(category_id, parent_id)?;
        let index = self.category_index(category_id)?;
        let id = new_id("item");
        let document = Document {
            id: new_id("doc"),
            name: name.to_string(),
            status: DocumentStatus::Pending,
            file_type: file_type.to_string(),
        };

        self.document_nodes.insert(document.id.clone(), id.clone());
        self.nodes.insert(
            id.clone(),
            Node {
                name: name.to_string(),
                category: category_id.to_string(),
                parent: parent.clone(),
                kind: NodeKind::Document(document),
            },
        );
        self.attach(index, parent.as_deref(), id.clone());
        self.categories[index].required += 1;
        self.update_category_stats(category_id)?;
        debug!("Created document {} in {}", id, category_id);

        Ok(id)
    }

    /// Removes the item with its subtree. The category's required count drops
    /// by the number of documents removed.
    pub fn delete_item(&mut self, category_id: &str, item_id: &str) -> TreeResult<()> {
        self.node_in_category(category_id, item_id)?;
        let index = self.category_index(category_id)?;

        let ids = self.subtree(item_id);
        let removed_documents = self.count_documents(&ids);

        self.detach(item_id);
        self.remove_nodes(&ids);

        let category = &mut self.categories[index];
        category.required = category.required.saturating_sub(removed_documents);
        self.update_category_stats(category_id)?;
        debug!("Deleted {} items from {}", ids.len(), category_id);

        Ok(())
    }

    pub fn rename_item(
        &mut self,
        category_id: &str,
        item_id: &str,
        new_name: &str,
    ) -> TreeResult<()> {
        self.node_in_category(category_id, item_id)?;

        if let Some(node) = self.nodes.get_mut(item_id) {
            node.name = new_name.to_string();
            if let NodeKind::Document(document) = &mut node.kind {
                document.name = new_name.to_string();
            }
        }

        Ok(())
    }

    pub fn set_document_status(
        &mut self,
        category_id: &str,
        item_id: &str,
        status: DocumentStatus,
    ) -> TreeResult<CategoryStats> {
        match self.node_in_category(category_id, item_id)?.kind {
            NodeKind::Document(_) => {}
            NodeKind::Folder { .. } => return Err(TreeError::NotADocument(item_id.to_string())),
        }

        if let Some(NodeKind::Document(document)) =
            self.nodes.get_mut(item_id).map(|node| &mut node.kind)
        {
            document.status = status;
        }

        self.update_category_stats(category_id)
    }

    /// Re-roots the named items of `source_category_id` at the top level of
    /// `target_category_id`, in the order given. Ids not found in the source
    /// are skipped, as are ids whose ancestor is moved in the same call. The
    /// moved documents carry their share of the required count with them.
    /// The selection is cleared on every call, including one that fails
    /// because a category is unknown; the tree itself is untouched on that
    /// path. Returns how many items were re-rooted.
    pub fn move_items(
        &mut self,
        source_category_id: &str,
        target_category_id: &str,
        item_ids: &[NodeID],
    ) -> TreeResult<usize> {
        let indices = self
            .category_index(source_category_id)
            .and_then(|source| Ok((source, self.category_index(target_category_id)?)));
        let (source_index, target_index) = match indices {
            Ok(indices) => indices,
            Err(e) => {
                self.selection.clear();
                return Err(e);
            }
        };

        if source_index == target_index {
            self.selection.clear();
            return Ok(0);
        }

        let located: HashSet<&str> = item_ids
            .iter()
            .map(|id| id.as_str())
            .filter(|id| {
                matches!(self.nodes.get(*id), Some(node) if node.category == source_category_id)
            })
            .collect();

        let mut roots: Vec<NodeID> = vec![];
        for id in item_ids {
            if !located.contains(id.as_str()) || roots.contains(id) {
                continue;
            }
            if self.has_ancestor_in(id, &located) {
                continue;
            }
            roots.push(id.clone());
        }

        let mut moved_documents = 0;
        for root in &roots {
            self.detach(root);

            let ids = self.subtree(root);
            moved_documents += self.count_documents(&ids);
            for id in &ids {
                if let Some(node) = self.nodes.get_mut(id) {
                    node.category = target_category_id.to_string();
                }
            }
            if let Some(node) = self.nodes.get_mut(root) {
                node.parent = None;
            }

            self.categories[target_index].roots.push(root.clone());
        }

        let source = &mut self.categories[source_index];
        source.required = source.required.saturating_sub(moved_documents);
        self.categories[target_index].required += moved_documents;

        self.update_category_stats(source_category_id)?;
        self.update_category_stats(target_category_id)?;
        self.selection.clear();
        debug!(
            "Moved {} items from {} to {}",
            roots.len(),
            source_category_id,
            target_category_id
        );

        Ok(roots.len())
    }

    fn has_ancestor_in(&self, node_id: &str, ids: &HashSet<&str>) -> bool {
        let mut parent = self.nodes.get(node_id).and_then(|node| node.parent.as_deref());

        while let Some(id) = parent {
            if ids.contains(id) {
                return true;
            }
            parent = self.nodes.get(id).and_then(|node| node.parent.as_deref());
        }

        false
    }

    pub fn toggle_document_selection(&mut self, document_id: &str) -> bool {
        let selected = self.selection.toggle(document_id);
        debug!("Selection holds {} documents", self.selection.len());

        selected
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected ids that still resolve to documents, ordered by document id.
    pub fn selected_documents(&self) -> Vec<SelectedDocument> {
        self.resolve_documents(self.selection.iter())
    }

    /// The given document ids that resolve to documents, ordered by document
    /// id. Stale ids are dropped.
    pub fn resolve_documents<'a>(
        &self,
        document_ids: impl IntoIterator<Item = &'a DocumentID>,
    ) -> Vec<SelectedDocument> {
        let mut selected: Vec<SelectedDocument> = document_ids
            .into_iter()
            .filter_map(|document_id| {
                let item_id = self.document_nodes.get(document_id)?;
                let node = self.nodes.get(item_id)?;
                match &node.kind {
                    NodeKind::Document(document) => Some(SelectedDocument {
                        category_id: node.category.clone(),
                        item_id: item_id.clone(),
                        document: document.clone(),
                    }),
                    NodeKind::Folder { .. } => None,
                }
            })
            .collect();

        selected.sort_by(|a, b| a.document.id.cmp(&b.document.id));
        selected.dedup_by(|a, b| a.document.id == b.document.id);
        selected
    }

    pub fn update_category_stats(&mut self, category_id: &str) -> TreeResult<CategoryStats> {
        let index = self.category_index(category_id)?;

        let stats = {
            let category = &self.categories[index];
            let ids: Vec<NodeID> = category
                .roots
                .iter()
                .flat_map(|root| self.subtree(root))
                .collect();
            let documents = ids.iter().filter_map(|id| match &self.nodes.get(id)?.kind {
                NodeKind::Document(document) => Some(document),
                NodeKind::Folder { .. } => None,
            });

            CategoryStats::compute(category.required, documents)
        };
        self.categories[index].stats = stats;

        Ok(stats)
    }

    fn build_item(&self, node_id: &str) -> Option<FolderItem> {
        let node = self.nodes.get(node_id)?;

        Some(match &node.kind {
            NodeKind::Folder { children } => FolderItem::Folder {
                id: node_id.to_string(),
                name: node.name.clone(),
                children: children.iter().filter_map(|child| self.build_item(child)).collect(),
            },
            NodeKind::Document(document) => FolderItem::Document {
                id: node_id.to_string(),
                name: node.name.clone(),
                document: document.clone(),
            },
        })
    }

    fn build_category(&self, category: &CategoryEntry) -> Category {
        Category {
            id: category.id.clone(),
            name: category.name.clone(),
            icon: category.icon.clone(),
            required: category.required,
            uploaded: category.stats.uploaded,
            status: category.stats.status,
            folder_structure: category
                .roots
                .iter()
                .filter_map(|root| self.build_item(root))
                .collect(),
        }
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories
            .iter()
            .map(|category| self.build_category(category))
            .collect()
    }

    pub fn category(&self, category_id: &str) -> TreeResult<Category> {
        let index = self.category_index(category_id)?;
        Ok(self.build_category(&self.categories[index]))
    }

    pub fn find_item(&self, item_id: &str) -> Option<FolderItem> {
        self.build_item(item_id)
    }

    pub fn checklist(&self) -> ChecklistSummary {
        ChecklistSummary::from_categories(self.categories().iter())
    }
}
