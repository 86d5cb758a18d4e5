use serde::{Deserialize, Serialize};

use crate::documents::data::SelectedDocument;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DocumentDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(default)]
    pub size: String,
}

impl From<SelectedDocument> for DocumentDescriptor {
    fn from(selected: SelectedDocument) -> Self {
        DocumentDescriptor {
            name: selected.document.name,
            file_type: selected.document.file_type,
            size: String::new(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct AnalyzeDocumentsRequest {
    #[serde(default)]
    pub documents: Option<Vec<DocumentDescriptor>>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Deserialize, Debug)]
pub struct GenerateTeaserRequest {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TeaserResponse {
    pub teaser: String,
}

/// Without a prompt, the session's saved teaser prompt is used.
#[derive(Deserialize, Debug, Default)]
pub struct SessionTeaserRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Deserialize, Debug)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}
