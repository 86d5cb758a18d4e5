use chrono::offset::Utc;
use log::debug;
use uuid::Uuid;

use super::data::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionID),
    #[error("Output not found: {0}")]
    OutputNotFound(OutputID),
}

pub type SessionResult<T> = Result<T, SessionError>;

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// A deal's analysis sessions and everything generated in them. Both lists
/// are kept oldest first and read back newest first.
#[derive(Debug, Clone, Default)]
pub struct SessionBook {
    sessions: Vec<AnalysisSession>,
    outputs: Vec<GeneratedOutput>,
    created: u32,
}

impl SessionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A blank or missing name falls back to "Analysis N", counting every
    /// session this book has created.
    pub fn create_session(&mut self, name: Option<String>) -> AnalysisSession {
        self.created += 1;
        let name = match name {
            Some(name) if !name.trim().is_empty() => name,
            _ => format!("Analysis {}", self.created),
        };

        let timestamp = now();
        let session = AnalysisSession {
            id: format!("session-{}", Uuid::new_v4()),
            name,
            selected_document_ids: vec![],
            summary: None,
            custom_prompts: CustomPrompts::default(),
            created_at: timestamp.clone(),
            updated_at: timestamp,
        };
        self.sessions.push(session.clone());
        debug!("Created analysis session {}", session.id);

        session
    }

    pub fn sessions(&self) -> Vec<AnalysisSession> {
        self.sessions.iter().rev().cloned().collect()
    }

    pub fn session(&self, session_id: &str) -> SessionResult<&AnalysisSession> {
        self.sessions
            .iter()
            .find(|session| session.id == session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))
    }

    fn session_mut(&mut self, session_id: &str) -> SessionResult<&mut AnalysisSession> {
        self.sessions
            .iter_mut()
            .find(|session| session.id == session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))
    }

    pub fn update_session(
        &mut self,
        session_id: &str,
        update: SessionUpdate,
    ) -> SessionResult<AnalysisSession> {
        let session = self.session_mut(session_id)?;

        if let Some(name) = update.name {
            session.name = name;
        }
        if let Some(selected_document_ids) = update.selected_document_ids {
            session.selected_document_ids = selected_document_ids;
        }
        if let Some(summary) = update.summary {
            session.summary = Some(summary);
        }
        if let Some(custom_prompts) = update.custom_prompts {
            session.custom_prompts = custom_prompts;
        }
        session.updated_at = now();

        Ok(session.clone())
    }

    /// Removes the session together with its outputs.
    pub fn delete_session(&mut self, session_id: &str) -> SessionResult<()> {
        let before = self.sessions.len();
        self.sessions.retain(|session| session.id != session_id);
        if self.sessions.len() == before {
            return Err(SessionError::SessionNotFound(session_id.to_string()));
        }

        self.outputs.retain(|output| output.session_id != session_id);
        debug!("Deleted analysis session {}", session_id);

        Ok(())
    }

    /// Stores a generated output under the session. A summary output also
    /// becomes the session's current summary.
    pub fn record_output(
        &mut self,
        session_id: &str,
        kind: OutputKind,
        content: String,
        prompt_used: Option<String>,
    ) -> SessionResult<GeneratedOutput> {
        let session = self.session_mut(session_id)?;
        if kind == OutputKind::Summary {
            session.summary = Some(content.clone());
        }
        let timestamp = now();
        session.updated_at = timestamp.clone();

        let output = GeneratedOutput {
            id: format!("output-{}", Uuid::new_v4()),
            session_id: session_id.to_string(),
            kind,
            content,
            prompt_used,
            created_at: timestamp,
        };
        self.outputs.push(output.clone());

        Ok(output)
    }

    pub fn outputs(
        &self,
        session_id: &str,
        kind: Option<OutputKind>,
    ) -> SessionResult<Vec<GeneratedOutput>> {
        self.session(session_id)?;

        Ok(self
            .outputs
            .iter()
            .rev()
            .filter(|output| output.session_id == session_id)
            .filter(|output| kind.map_or(true, |kind| output.kind == kind))
            .cloned()
            .collect())
    }

    pub fn delete_output(&mut self, session_id: &str, output_id: &str) -> SessionResult<()> {
        self.session(session_id)?;

        let index = self
            .outputs
            .iter()
            .position(|output| output.id == output_id && output.session_id == session_id)
            .ok_or_else(|| SessionError::OutputNotFound(output_id.to_string()))?;
        self.outputs.remove(index);

        Ok(())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
