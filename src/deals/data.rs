use serde::{Deserialize, Serialize};

use crate::data::DealID;
use crate::documents::data::CategorySeed;
use crate::documents::tree::DocumentManager;
use crate::sessions::book::SessionBook;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    #[default]
    Active,
    Pending,
    Completed,
    Cancelled,
}

/// Descriptive fields of a deal. None of them affect the document room.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DealInfo {
    pub name: String,
    pub client: String,
    pub status: DealStatus,
    pub phase: String,
    pub value: f64,
    pub close_date: Option<String>,
    pub description: String,
}

/// Everything held for one deal.
#[derive(Debug, Default)]
pub struct Deal {
    pub info: DealInfo,
    pub documents: DocumentManager,
    pub sessions: SessionBook,
}

impl Deal {
    pub fn new(info: DealInfo, documents: DocumentManager) -> Deal {
        Deal {
            info,
            documents,
            sessions: SessionBook::new(),
        }
    }

    pub fn summary(&self, id: &str) -> DealSummary {
        DealSummary {
            id: id.to_string(),
            info: self.info.clone(),
            progress: self.documents.checklist().completion_percentage,
            sessions: self.sessions.session_count(),
        }
    }
}

/// `progress` is the document checklist completion, not a stored figure.
#[derive(Serialize, Debug)]
pub struct DealSummary {
    pub id: DealID,
    #[serde(flatten)]
    pub info: DealInfo,
    pub progress: u32,
    pub sessions: usize,
}

#[derive(Deserialize, Debug)]
pub struct CreateDealRequest {
    pub id: Option<String>,
    #[serde(flatten)]
    pub info: DealInfo,
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
}

#[derive(Serialize, Debug)]
pub struct CreateDealResult {
    pub deal_id: String,
}
