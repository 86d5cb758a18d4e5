use rocket::FromFormField;
use serde::{Deserialize, Serialize};

use crate::documents::data::DocumentID;

pub type SessionID = String;
pub type OutputID = String;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomPrompts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teaser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cim: Option<String>,
}

/// A named piece of analysis work on a deal: which documents it covers, the
/// summary produced for them and the prompts used to build on that summary.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSession {
    pub id: SessionID,
    pub name: String,
    pub selected_document_ids: Vec<DocumentID>,
    pub summary: Option<String>,
    pub custom_prompts: CustomPrompts,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, Deserialize, FromFormField, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Summary,
    Teaser,
    Cim,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    pub id: OutputID,
    pub session_id: SessionID,
    #[serde(rename = "type")]
    pub kind: OutputKind,
    pub content: String,
    pub prompt_used: Option<String>,
    pub created_at: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Partial update of a session; absent fields are left alone.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct SessionUpdate {
    pub name: Option<String>,
    pub selected_document_ids: Option<Vec<DocumentID>>,
    pub summary: Option<String>,
    pub custom_prompts: Option<CustomPrompts>,
}

#[derive(Deserialize, Debug)]
pub struct CreateOutputRequest {
    #[serde(rename = "type")]
    pub kind: OutputKind,
    pub content: String,
    #[serde(default)]
    pub prompt_used: Option<String>,
}
