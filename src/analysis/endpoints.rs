use log::info;
use rocket::serde::json::Json;
use rocket::{post, State};

use super::data::*;
use super::gateway::{GatewayClient, GatewayError};
use super::prompts::*;
use crate::data::{get_deal, DealStore};
use crate::internal_error::InternalResult;
use crate::sessions::data::{GeneratedOutput, OutputKind, SessionUpdate};

fn no_documents() -> GatewayError {
    GatewayError::BadRequest("No documents provided".to_string())
}

fn missing_summary_or_prompt() -> GatewayError {
    GatewayError::BadRequest("Summary and prompt are required".to_string())
}

async fn summarize(
    documents: &[DocumentDescriptor],
    gateway: &GatewayClient,
) -> InternalResult<String> {
    info!("Summarizing {} documents", documents.len());
    let summary = gateway
        .complete(ANALYST_ROLE, &summary_prompt(documents))
        .await?;

    Ok(summary)
}

#[post("/functions/analyze-documents", format = "json", data = "<analyze_request>")]
pub async fn analyze_documents(
    analyze_request: Json<AnalyzeDocumentsRequest>,
    gateway: &State<GatewayClient>,
) -> InternalResult<Json<SummaryResponse>> {
    let documents = match analyze_request.into_inner().documents {
        Some(documents) if !documents.is_empty() => documents,
        _ => return Err(no_documents().into()),
    };

    let summary = summarize(&documents, gateway).await?;

    Ok(Json(SummaryResponse { summary }))
}

#[post("/functions/generate-teaser", format = "json", data = "<teaser_request>")]
pub async fn generate_teaser(
    teaser_request: Json<GenerateTeaserRequest>,
    gateway: &State<GatewayClient>,
) -> InternalResult<Json<TeaserResponse>> {
    let teaser_request = teaser_request.into_inner();
    let (summary, prompt) = match (teaser_request.summary, teaser_request.prompt) {
        (Some(summary), Some(prompt)) if !summary.is_empty() && !prompt.is_empty() => {
            (summary, prompt)
        }
        _ => return Err(missing_summary_or_prompt().into()),
    };

    info!("Generating teaser document");
    let teaser = gateway
        .complete(TEASER_ROLE, &teaser_prompt(&prompt, &summary))
        .await?;

    Ok(Json(TeaserResponse { teaser }))
}

/// Summarizes the documents currently selected in a deal's document room.
#[post("/deals/<deal_id>/selection/analyze")]
pub async fn analyze_selection(
    deal_id: &str,
    deal_store: &State<DealStore>,
    gateway: &State<GatewayClient>,
) -> InternalResult<Json<SummaryResponse>> {
    let documents: Vec<DocumentDescriptor> = {
        let deal = get_deal(deal_store, deal_id)?;
        let deal = deal.lock()?;
        if deal.documents.selection().is_empty() {
            return Err(GatewayError::BadRequest("No documents selected".to_string()).into());
        }

        deal.documents
            .selected_documents()
            .into_iter()
            .map(DocumentDescriptor::from)
            .collect()
    };

    if documents.is_empty() {
        return Err(no_documents().into());
    }

    let summary = summarize(&documents, gateway).await?;

    Ok(Json(SummaryResponse { summary }))
}

/// Summarizes a session's documents and stores the result as the session's
/// summary. A session with no documents of its own takes over the deal's
/// current selection. The deal is unlocked while the gateway is called, so
/// the session may be deleted in the meantime; that surfaces as not found.
#[post("/deals/<deal_id>/sessions/<session_id>/summarize")]
pub async fn summarize_session(
    deal_id: &str,
    session_id: &str,
    deal_store: &State<DealStore>,
    gateway: &State<GatewayClient>,
) -> InternalResult<Json<GeneratedOutput>> {
    let deal = get_deal(deal_store, deal_id)?;

    let (document_ids, documents) = {
        let deal = deal.lock()?;
        let session = deal.sessions.session(session_id)?;
        let requested: Vec<String> = if session.selected_document_ids.is_empty() {
            deal.documents.selection().iter().cloned().collect()
        } else {
            session.selected_document_ids.clone()
        };

        let resolved = deal.documents.resolve_documents(&requested);
        let document_ids: Vec<String> = resolved.iter().map(|d| d.document.id.clone()).collect();
        let documents: Vec<DocumentDescriptor> =
            resolved.into_iter().map(DocumentDescriptor::from).collect();
        (document_ids, documents)
    };

    if documents.is_empty() {
        return Err(no_documents().into());
    }

    let summary = summarize(&documents, gateway).await?;

    let mut deal = deal.lock()?;
    deal.sessions.update_session(
        session_id,
        SessionUpdate {
            selected_document_ids: Some(document_ids),
            ..Default::default()
        },
    )?;
    let output = deal
        .sessions
        .record_output(session_id, OutputKind::Summary, summary, None)?;

    Ok(Json(output))
}

/// Generates a teaser from the session's stored summary and records it with
/// the prompt that produced it.
#[post(
    "/deals/<deal_id>/sessions/<session_id>/teaser",
    format = "json",
    data = "<teaser_request>"
)]
pub async fn generate_session_teaser(
    deal_id: &str,
    session_id: &str,
    teaser_request: Json<SessionTeaserRequest>,
    deal_store: &State<DealStore>,
    gateway: &State<GatewayClient>,
) -> InternalResult<Json<GeneratedOutput>> {
    let deal = get_deal(deal_store, deal_id)?;

    let (summary, prompt) = {
        let deal = deal.lock()?;
        let session = deal.sessions.session(session_id)?;
        let prompt = teaser_request
            .into_inner()
            .prompt
            .or_else(|| session.custom_prompts.teaser.clone());
        (session.summary.clone(), prompt)
    };

    let (summary, prompt) = match (summary, prompt) {
        (Some(summary), Some(prompt)) if !summary.is_empty() && !prompt.is_empty() => {
            (summary, prompt)
        }
        _ => return Err(missing_summary_or_prompt().into()),
    };

    info!("Generating teaser for session {}", session_id);
    let teaser = gateway
        .complete(TEASER_ROLE, &teaser_prompt(&prompt, &summary))
        .await?;

    let mut deal = deal.lock()?;
    let output = deal
        .sessions
        .record_output(session_id, OutputKind::Teaser, teaser, Some(prompt))?;

    Ok(Json(output))
}
