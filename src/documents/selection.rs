use std::collections::HashSet;

use super::data::DocumentID;

/// Documents marked for bulk operations. Membership only, never checked
/// against the tree.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    documents: HashSet<DocumentID>,
}

impl Selection {
    /// Returns whether the document is selected after the toggle.
    pub fn toggle(&mut self, document_id: &str) -> bool {
        if self.documents.remove(document_id) {
            false
        } else {
            self.documents.insert(document_id.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    #[cfg(test)]
    pub fn contains(&self, document_id: &str) -> bool {
        self.documents.contains(document_id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentID> {
        self.documents.iter()
    }
}
