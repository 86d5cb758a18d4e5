use serde::{Deserialize, Serialize};

pub type CategoryID = String;
pub type NodeID = String;
pub type DocumentID = String;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Uploaded,
    Pending,
    Overdue,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryStatus {
    Completed,
    InProgress,
    Pending,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentID,
    pub name: String,
    pub status: DocumentStatus,
    #[serde(rename = "type")]
    pub file_type: String,
}

/// A node of a category's document tree, in the nested shape the dashboard
/// renders and the shape seeds are supplied in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FolderItem {
    Folder {
        id: NodeID,
        name: String,
        #[serde(default)]
        children: Vec<FolderItem>,
    },
    Document {
        id: NodeID,
        name: String,
        document: Document,
    },
}

impl FolderItem {
    pub fn folder(id: &str, name: &str, children: Vec<FolderItem>) -> FolderItem {
        FolderItem::Folder {
            id: id.to_string(),
            name: name.to_string(),
            children,
        }
    }

    pub fn document(id: &str, name: &str, status: DocumentStatus, file_type: &str) -> FolderItem {
        FolderItem::Document {
            id: id.to_string(),
            name: name.to_string(),
            document: Document {
                id: format!("doc-{}", id),
                name: name.to_string(),
                status,
                file_type: file_type.to_string(),
            },
        }
    }

    pub fn id(&self) -> &str {
        match self {
            FolderItem::Folder { id, .. } => id,
            FolderItem::Document { id, .. } => id,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryID,
    pub name: String,
    pub icon: String,
    pub required: u32,
    pub uploaded: u32,
    pub status: CategoryStatus,
    pub folder_structure: Vec<FolderItem>,
}

/// Caller-supplied initial state of a category. `uploaded` and `status` are
/// always derived, never taken from the seed.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategorySeed {
    pub id: Option<CategoryID>,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub required: u32,
    #[serde(default)]
    pub folder_structure: Vec<FolderItem>,
}

fn default_icon() -> String {
    "folder".to_string()
}

/// A selected document resolved against the tree.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SelectedDocument {
    pub category_id: CategoryID,
    pub item_id: NodeID,
    pub document: Document,
}

#[derive(Deserialize, Debug)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

#[derive(Deserialize, Debug)]
pub struct RenameRequest {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct CreateFolderRequest {
    #[serde(default)]
    pub parent_id: Option<NodeID>,
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct CreateDocumentRequest {
    #[serde(default)]
    pub parent_id: Option<NodeID>,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
}

#[derive(Deserialize, Debug)]
pub struct SetStatusRequest {
    pub status: DocumentStatus,
}

#[derive(Deserialize, Debug)]
pub struct MoveItemsRequest {
    pub source_category_id: CategoryID,
    pub target_category_id: CategoryID,
    pub item_ids: Vec<NodeID>,
}

#[derive(Serialize, Debug)]
pub struct MoveItemsResult {
    pub moved: usize,
}

#[derive(Serialize, Debug)]
pub struct CreatedResult {
    pub id: String,
}

#[derive(Deserialize, Debug)]
pub struct ToggleSelectionRequest {
    pub document_id: DocumentID,
}

#[derive(Serialize, Debug)]
pub struct ToggleSelectionResult {
    pub selected: bool,
}

#[derive(Serialize, Debug)]
pub struct SelectionResponse {
    pub document_ids: Vec<DocumentID>,
    pub documents: Vec<SelectedDocument>,
}
