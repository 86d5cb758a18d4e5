use log::info;
use rocket::serde::json::Json;
use rocket::{delete, get, post, State};
use uuid::Uuid;

use crate::data::*;
use crate::documents::tree::DocumentManager;
use crate::internal_error::InternalResult;

use super::data::*;

#[get("/deals")]
pub fn get_deals(deal_store: &State<DealStore>) -> InternalResult<Json<Vec<DealID>>> {
    Ok(Json(deal_ids(deal_store)?))
}

#[post("/deals", format = "json", data = "<create_deal_request>")]
pub fn create_deal(
    create_deal_request: Json<CreateDealRequest>,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<CreateDealResult>> {
    let create_deal_request = create_deal_request.into_inner();
    let deal_id = create_deal_request
        .id
        .unwrap_or_else(|| format!("deal-{}", Uuid::new_v4()));

    let documents = DocumentManager::from_seeds(create_deal_request.categories)?;
    insert_deal(
        deal_store,
        deal_id.clone(),
        Deal::new(create_deal_request.info, documents),
    )?;
    info!("Created deal {}", deal_id);

    Ok(Json(CreateDealResult { deal_id }))
}

#[get("/deals/<deal_id>")]
pub fn get_deal_summary(
    deal_id: &str,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<DealSummary>> {
    let deal = get_deal(deal_store, deal_id)?;
    let deal = deal.lock()?;

    Ok(Json(deal.summary(deal_id)))
}

#[post("/deals/<deal_id>/info", format = "json", data = "<deal_info>")]
pub fn update_deal_info(
    deal_id: &str,
    deal_info: Json<DealInfo>,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<DealSummary>> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;

    deal.info = deal_info.into_inner();

    Ok(Json(deal.summary(deal_id)))
}

#[delete("/deals/<deal_id>")]
pub fn delete_deal(deal_id: &str, deal_store: &State<DealStore>) -> InternalResult<()> {
    remove_deal(deal_store, deal_id)?;
    info!("Deleted deal {}", deal_id);

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

    #[test]
    fn create_deal_from_seed_categories() {
        let client = client();

        let audit = json!({
            "type": "document", "id": "i1", "name": "Audit",
            "document": { "id": "d1", "name": "Audit", "status": "uploaded", "type": "pdf" }
        });
        let response = client
            .post("/api/deals")
            .json(&json!({
                "id": "acme",
                "name": "Acme Buyout",
                "client": "Acme Corp",
                "phase": "Initial Review",
                "value": 75000000,
                "categories": [{
                    "id": "fin",
                    "name": "Financial Documents",
                    "icon": "financial",
                    "required": 2,
                    "folderStructure": [
                        { "type": "folder", "id": "f1", "name": "Statements", "children": [audit] }
                    ]
                }]
            }))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let categories: Value = client
            .get("/api/deals/acme/categories")
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(categories[0]["uploaded"], 1);
        assert_eq!(categories[0]["status"], "in-progress");
        assert_eq!(categories[0]["folderStructure"][0]["children"][0]["document"]["id"], "d1");

        let summary: Value = client.get("/api/deals/acme").dispatch().into_json().unwrap();
        assert_eq!(summary["name"], "Acme Buyout");
        assert_eq!(summary["client"], "Acme Corp");
        assert_eq!(summary["progress"], 50);

        let duplicate = client.post("/api/deals").json(&json!({ "id": "acme" })).dispatch();
        assert_eq!(duplicate.status(), Status::Conflict);
    }

    #[test]
    fn deal_info_is_replaced() {
        let client = client();

        let response = client
            .post("/api/deals/demo/info")
            .json(&json!({ "name": "TechCorp Acquisition", "status": "completed" }))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let summary: Value = client.get("/api/deals/demo").dispatch().into_json().unwrap();
        assert_eq!(summary["name"], "TechCorp Acquisition");
        assert_eq!(summary["status"], "completed");
        assert_eq!(summary["client"], "");
        assert_eq!(summary["progress"], 79);
    }

    #[test]
    fn delete_deal_removes_it() {
        let client = client();

        assert_eq!(client.delete("/api/deals/demo").dispatch().status(), Status::Ok);
        assert_eq!(
            client.delete("/api/deals/demo").dispatch().status(),
            Status::NotFound
        );
        assert_eq!(client.get("/api/deals/demo").dispatch().status(), Status::NotFound);
    }
}
