use rocket::serde::json::Json;
use rocket::{delete, get, post, State};

use crate::data::*;
use crate::internal_error::InternalResult;

use super::data::*;

#[get("/deals/<deal_id>/sessions")]
pub fn get_sessions(
    deal_id: &str,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<Vec<AnalysisSession>>> {
    let deal = get_deal(deal_store, deal_id)?;
    let deal = deal.lock()?;

    Ok(Json(deal.sessions.sessions()))
}

#[post("/deals/<deal_id>/sessions", format = "json", data = "<create_session_request>")]
pub fn create_session(
    deal_id: &str,
    create_session_request: Json<CreateSessionRequest>,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<AnalysisSession>> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;

    let session = deal
        .sessions
        .create_session(create_session_request.into_inner().name);

    Ok(Json(session))
}

#[get("/deals/<deal_id>/sessions/<session_id>")]
pub fn get_session(
    deal_id: &str,
    session_id: &str,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<AnalysisSession>> {
    let deal = get_deal(deal_store, deal_id)?;
    let deal = deal.lock()?;

    Ok(Json(deal.sessions.session(session_id)?.clone()))
}

#[post(
    "/deals/<deal_id>/sessions/<session_id>",
    format = "json",
    data = "<session_update>"
)]
pub fn update_session(
    deal_id: &str,
    session_id: &str,
    session_update: Json<SessionUpdate>,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<AnalysisSession>> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;

    let session = deal
        .sessions
        .update_session(session_id, session_update.into_inner())?;

    Ok(Json(session))
}

#[delete("/deals/<deal_id>/sessions/<session_id>")]
pub fn delete_session(
    deal_id: &str,
    session_id: &str,
    deal_store: &State<DealStore>,
) -> InternalResult<()> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;

    deal.sessions.delete_session(session_id)?;

    Ok(())
}

#[get("/deals/<deal_id>/sessions/<session_id>/outputs?<kind>")]
pub fn get_outputs(
    deal_id: &str,
    session_id: &str,
    kind: Option<OutputKind>,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<Vec<GeneratedOutput>>> {
    let deal = get_deal(deal_store, deal_id)?;
    let deal = deal.lock()?;

    Ok(Json(deal.sessions.outputs(session_id, kind)?))
}

#[post(
    "/deals/<deal_id>/sessions/<session_id>/outputs",
    format = "json",
    data = "<create_output_request>"
)]
pub fn create_output(
    deal_id: &str,
    session_id: &str,
    create_output_request: Json<CreateOutputRequest>,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<GeneratedOutput>> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;

    let request = create_output_request.into_inner();
    let output = deal.sessions.record_output(
        session_id,
        request.kind,
        request.content,
        request.prompt_used,
    )?;

    Ok(Json(output))
}

#[delete("/deals/<deal_id>/sessions/<session_id>/outputs/<output_id>")]
pub fn delete_output(
    deal_id: &str,
    session_id: &str,
    output_id: &str,
    deal_store: &State<DealStore>,
) -> InternalResult<()> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;

    deal.sessions.delete_output(session_id, output_id)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::build_rocket;
    use rocket::figment::Figment;
    use rocket::http::Status;
    use rocket::local::blocking::Client;
    use serde_json::{json, Value};

    fn client() -> Client {
        let figment = Figment::from(rocket::Config::debug_default())
            .merge(("seed_demo_deal", true))
            .merge(("demo_deal_id", "demo"));

        Client::tracked(build_rocket(figment).unwrap()).unwrap()
    }

    fn create_session(client: &Client, body: Value) -> Value {
        let response = client.post("/api/deals/demo/sessions").json(&body).dispatch();
        assert_eq!(response.status(), Status::Ok);

        response.into_json().unwrap()
    }

    #[test]
    fn session_lifecycle() {
        let client = client();

        let session = create_session(&client, json!({}));
        assert_eq!(session["name"], "Analysis 1");
        assert_eq!(session["summary"], Value::Null);
        let uri = format!("/api/deals/demo/sessions/{}", session["id"].as_str().unwrap());

        let updated: Value = client
            .post(uri.as_str())
            .json(&json!({
                "name": "Legal review",
                "selected_document_ids": ["doc-legal-1", "doc-legal-2"],
                "custom_prompts": { "teaser": "Focus on IP" }
            }))
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(updated["name"], "Legal review");
        assert_eq!(updated["custom_prompts"], json!({ "teaser": "Focus on IP" }));

        let fetched: Value = client.get(uri.as_str()).dispatch().into_json().unwrap();
        assert_eq!(fetched["selected_document_ids"], json!(["doc-legal-1", "doc-legal-2"]));

        assert_eq!(client.delete(uri.as_str()).dispatch().status(), Status::Ok);
        let missing = client.get(uri.as_str()).dispatch();
        assert_eq!(missing.status(), Status::NotFound);
        let body: Value = missing.into_json().unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("Session not found"));
    }

    #[test]
    fn sessions_are_listed_newest_first() {
        let client = client();
        create_session(&client, json!({ "name": "First" }));
        create_session(&client, json!({ "name": "Second" }));

        let sessions: Value = client
            .get("/api/deals/demo/sessions")
            .dispatch()
            .into_json()
            .unwrap();

        assert_eq!(sessions[0]["name"], "Second");
        assert_eq!(sessions[1]["name"], "First");

        let deal: Value = client.get("/api/deals/demo").dispatch().into_json().unwrap();
        assert_eq!(deal["sessions"], 2);
    }

    #[test]
    fn outputs_are_stored_and_filtered_by_type() {
        let client = client();
        let session = create_session(&client, json!({}));
        let outputs_uri = format!(
            "/api/deals/demo/sessions/{}/outputs",
            session["id"].as_str().unwrap()
        );

        let teaser: Value = client
            .post(outputs_uri.as_str())
            .json(&json!({ "type": "teaser", "content": "# Falcon", "prompt_used": "Be brief" }))
            .dispatch()
            .into_json()
            .unwrap();
        client
            .post(outputs_uri.as_str())
            .json(&json!({ "type": "cim", "content": "Full memorandum" }))
            .dispatch();

        let all: Value = client.get(outputs_uri.as_str()).dispatch().into_json().unwrap();
        assert_eq!(all.as_array().unwrap().len(), 2);
        assert_eq!(all[0]["type"], "cim");

        let teasers: Value = client
            .get(format!("{}?kind=teaser", outputs_uri))
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(teasers.as_array().unwrap().len(), 1);
        assert_eq!(teasers[0]["prompt_used"], "Be brief");

        let delete_uri = format!("{}/{}", outputs_uri, teaser["id"].as_str().unwrap());
        assert_eq!(client.delete(delete_uri.as_str()).dispatch().status(), Status::Ok);
        assert_eq!(client.delete(delete_uri.as_str()).dispatch().status(), Status::NotFound);
    }

    #[test]
    fn sessions_of_unknown_deal_are_not_found() {
        let client = client();

        let response = client.get("/api/deals/missing/sessions").dispatch();

        assert_eq!(response.status(), Status::NotFound);
    }
}
