use rocket::serde::json::Json;
use rocket::{delete, get, post, State};

use crate::data::*;
use crate::internal_error::InternalResult;

use super::data::*;
use super::stats::ChecklistSummary;
use super::tree::TreeError;

#[get("/deals/<deal_id>/categories")]
pub fn get_categories(
    deal_id: &str,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<Vec<Category>>> {
    let deal = get_deal(deal_store, deal_id)?;
    let deal = deal.lock()?;
    let manager = &deal.documents;

    Ok(Json(manager.categories()))
}

#[get("/deals/<deal_id>/checklist")]
pub fn get_checklist(
    deal_id: &str,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<ChecklistSummary>> {
    let deal = get_deal(deal_store, deal_id)?;
    let deal = deal.lock()?;
    let manager = &deal.documents;

    Ok(Json(manager.checklist()))
}

#[get("/deals/<deal_id>/items/<item_id>")]
pub fn get_item(
    deal_id: &str,
    item_id: &str,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<FolderItem>> {
    let deal = get_deal(deal_store, deal_id)?;
    let deal = deal.lock()?;
    let manager = &deal.documents;

    let item = manager
        .find_item(item_id)
        .ok_or_else(|| TreeError::ItemNotFound(item_id.to_string()))?;

    Ok(Json(item))
}

#[post(
    "/deals/<deal_id>/categories",
    format = "json",
    data = "<create_category_request>"
)]
pub fn create_category(
    deal_id: &str,
    create_category_request: Json<CreateCategoryRequest>,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<CreatedResult>> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;
    let manager = &mut deal.documents;

    let id = manager.create_category(
        &create_category_request.name,
        &create_category_request.icon,
    );

    Ok(Json(CreatedResult { id }))
}

#[delete("/deals/<deal_id>/categories/<category_id>")]
pub fn delete_category(
    deal_id: &str,
    category_id: &str,
    deal_store: &State<DealStore>,
) -> InternalResult<()> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;
    let manager = &mut deal.documents;

    manager.delete_category(category_id)?;

    Ok(())
}

#[post(
    "/deals/<deal_id>/categories/<category_id>/rename",
    format = "json",
    data = "<rename_request>"
)]
pub fn rename_category(
    deal_id: &str,
    category_id: &str,
    rename_request: Json<RenameRequest>,
    deal_store: &State<DealStore>,
) -> InternalResult<()> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;
    let manager = &mut deal.documents;

    manager.rename_category(category_id, &rename_request.name)?;

    Ok(())
}

#[post("/deals/<deal_id>/categories/<category_id>/stats")]
pub fn update_category_stats(
    deal_id: &str,
    category_id: &str,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<Category>> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;
    let manager = &mut deal.documents;

    manager.update_category_stats(category_id)?;

    Ok(Json(manager.category(category_id)?))
}

#[post(
    "/deals/<deal_id>/categories/<category_id>/folders",
    format = "json",
    data = "<create_folder_request>"
)]
pub fn create_folder(
    deal_id: &str,
    category_id: &str,
    create_folder_request: Json<CreateFolderRequest>,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<CreatedResult>> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;
    let manager = &mut deal.documents;

    let id = manager.create_folder(
        category_id,
        create_folder_request.parent_id.as_deref(),
        &create_folder_request.name,
    )?;

    Ok(Json(CreatedResult { id }))
}

#[post(
    "/deals/<deal_id>/categories/<category_id>/documents",
    format = "json",
    data = "<create_document_request>"
)]
pub fn create_document(
    deal_id: &str,
    category_id: &str,
    create_document_request: Json<CreateDocumentRequest>,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<CreatedResult>> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;
    let manager = &mut deal.documents;

    let id = manager.create_document(
        category_id,
        create_document_request.parent_id.as_deref(),
        &create_document_request.name,
        &create_document_request.file_type,
    )?;

    Ok(Json(CreatedResult { id }))
}

#[delete("/deals/<deal_id>/categories/<category_id>/items/<item_id>")]
pub fn delete_item(
    deal_id: &str,
    category_id: &str,
    item_id: &str,
    deal_store: &State<DealStore>,
) -> InternalResult<()> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;
    let manager = &mut deal.documents;

    manager.delete_item(category_id, item_id)?;

    Ok(())
}

#[post(
    "/deals/<deal_id>/categories/<category_id>/items/<item_id>/rename",
    format = "json",
    data = "<rename_request>"
)]
pub fn rename_item(
    deal_id: &str,
    category_id: &str,
    item_id: &str,
    rename_request: Json<RenameRequest>,
    deal_store: &State<DealStore>,
) -> InternalResult<()> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;
    let manager = &mut deal.documents;

    manager.rename_item(category_id, item_id, &rename_request.name)?;

    Ok(())
}

#[post(
    "/deals/<deal_id>/categories/<category_id>/items/<item_id>/status",
    format = "json",
    data = "<set_status_request>"
)]
pub fn set_document_status(
    deal_id: &str,
    category_id: &str,
    item_id: &str,
    set_status_request: Json<SetStatusRequest>,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<Category>> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;
    let manager = &mut deal.documents;

    manager.set_document_status(category_id, item_id, set_status_request.status)?;

    Ok(Json(manager.category(category_id)?))
}

#[post("/deals/<deal_id>/move", format = "json", data = "<move_items_request>")]
pub fn move_items(
    deal_id: &str,
    move_items_request: Json<MoveItemsRequest>,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<MoveItemsResult>> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;
    let manager = &mut deal.documents;

    let moved = manager.move_items(
        &move_items_request.source_category_id,
        &move_items_request.target_category_id,
        &move_items_request.item_ids,
    )?;

    Ok(Json(MoveItemsResult { moved }))
}

#[get("/deals/<deal_id>/selection")]
pub fn get_selection(
    deal_id: &str,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<SelectionResponse>> {
    let deal = get_deal(deal_store, deal_id)?;
    let deal = deal.lock()?;
    let manager = &deal.documents;

    let mut document_ids: Vec<DocumentID> = manager.selection().iter().cloned().collect();
    document_ids.sort();

    Ok(Json(SelectionResponse {
        document_ids,
        documents: manager.selected_documents(),
    }))
}

#[post(
    "/deals/<deal_id>/selection/toggle",
    format = "json",
    data = "<toggle_request>"
)]
pub fn toggle_document_selection(
    deal_id: &str,
    toggle_request: Json<ToggleSelectionRequest>,
    deal_store: &State<DealStore>,
) -> InternalResult<Json<ToggleSelectionResult>> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;
    let manager = &mut deal.documents;

    let selected = manager.toggle_document_selection(&toggle_request.document_id);

    Ok(Json(ToggleSelectionResult { selected }))
}

#[delete("/deals/<deal_id>/selection")]
pub fn clear_selection(deal_id: &str, deal_store: &State<DealStore>) -> InternalResult<()> {
    let deal = get_deal(deal_store, deal_id)?;
    let mut deal = deal.lock()?;
    let manager = &mut deal.documents;

    manager.clear_selection();

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

    fn category(client: &Client, deal_id: &str, category_id: &str) -> Value {
        let categories: Value = client
            .get(format!("/api/deals/{}/categories", deal_id))
            .dispatch()
            .into_json()
            .unwrap();

        categories
            .as_array()
            .unwrap()
            .iter()
            .find(|category| category["id"] == category_id)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn create(client: &Client, uri: &str, body: Value) -> String {
        let response = client.post(uri).json(&body).dispatch();
        assert_eq!(response.status(), Status::Ok);

        let created: Value = response.into_json().unwrap();
        created["id"].as_str().unwrap().to_string()
    }

    #[test]
    fn demo_deal_is_seeded() {
        let client = client();

        let deals: Value = client.get("/api/deals").dispatch().into_json().unwrap();
        assert_eq!(deals, json!(["demo"]));

        let checklist: Value = client
            .get("/api/deals/demo/checklist")
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(checklist["totalRequired"], 19);
        assert_eq!(checklist["totalUploaded"], 15);
    }

    #[test]
    fn unknown_deal_is_not_found() {
        let client = client();

        let response = client.get("/api/deals/missing/categories").dispatch();
        assert_eq!(response.status(), Status::NotFound);

        let body: Value = response.into_json().unwrap();
        assert_eq!(body["error"], "Deal not found: missing");
    }

    #[test]
    fn category_lifecycle() {
        let client = client();

        let id = create(
            &client,
            "/api/deals/demo/categories",
            json!({ "name": "Commercial", "icon": "folder" }),
        );
        assert_eq!(category(&client, "demo", &id)["status"], "pending");

        let rename = client
            .post(format!("/api/deals/demo/categories/{}/rename", id))
            .json(&json!({ "name": "Commercial Documents" }))
            .dispatch();
        assert_eq!(rename.status(), Status::Ok);
        assert_eq!(category(&client, "demo", &id)["name"], "Commercial Documents");

        let delete = client
            .delete(format!("/api/deals/demo/categories/{}", id))
            .dispatch();
        assert_eq!(delete.status(), Status::Ok);
        assert_eq!(category(&client, "demo", &id), Value::Null);

        let again = client
            .delete(format!("/api/deals/demo/categories/{}", id))
            .dispatch();
        assert_eq!(again.status(), Status::NotFound);
    }

    #[test]
    fn documents_are_created_renamed_and_deleted() {
        let client = client();

        let folder = create(
            &client,
            "/api/deals/demo/categories/legal/folders",
            json!({ "name": "Contracts" }),
        );
        let item = create(
            &client,
            "/api/deals/demo/categories/legal/documents",
            json!({ "parent_id": folder, "name": "NDA", "type": "pdf" }),
        );
        assert_eq!(category(&client, "demo", "legal")["required"], 7);

        let rename = client
            .post(format!("/api/deals/demo/categories/legal/items/{}/rename", item))
            .json(&json!({ "name": "Mutual NDA" }))
            .dispatch();
        assert_eq!(rename.status(), Status::Ok);

        let legal = category(&client, "demo", "legal");
        let contracts = legal["folderStructure"]
            .as_array()
            .unwrap()
            .iter()
            .find(|item| item["id"] == folder.as_str())
            .cloned()
            .unwrap();
        assert_eq!(contracts["children"][0]["name"], "Mutual NDA");
        assert_eq!(contracts["children"][0]["document"]["name"], "Mutual NDA");
        assert_eq!(contracts["children"][0]["document"]["status"], "pending");

        let delete = client
            .delete(format!("/api/deals/demo/categories/legal/items/{}", folder))
            .dispatch();
        assert_eq!(delete.status(), Status::Ok);
        assert_eq!(category(&client, "demo", "legal")["required"], 6);
    }

    #[test]
    fn document_under_document_is_rejected() {
        let client = client();

        let response = client
            .post("/api/deals/demo/categories/legal/documents")
            .json(&json!({ "parent_id": "legal-1", "name": "NDA", "type": "pdf" }))
            .dispatch();

        assert_eq!(response.status(), Status::UnprocessableEntity);
        assert_eq!(category(&client, "demo", "legal")["required"], 6);
    }

    #[test]
    fn status_change_updates_category() {
        let client = client();

        let response = client
            .post("/api/deals/demo/categories/legal/items/legal-5/status")
            .json(&json!({ "status": "uploaded" }))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let legal: Value = response.into_json().unwrap();
        assert_eq!(legal["uploaded"], 5);

        let stats: Value = client
            .post("/api/deals/demo/categories/legal/stats")
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(stats["uploaded"], 5);
        assert_eq!(stats["status"], "in-progress");
    }

    #[test]
    fn move_items_between_categories() {
        let client = client();

        let response = client
            .post("/api/deals/demo/move")
            .json(&json!({
                "source_category_id": "financial",
                "target_category_id": "legal",
                "item_ids": ["financial-tax", "missing-id"]
            }))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let result: Value = response.into_json().unwrap();
        assert_eq!(result["moved"], 1);

        let financial = category(&client, "demo", "financial");
        assert_eq!(financial["required"], 3);
        assert_eq!(financial["uploaded"], 3);
        assert_eq!(financial["status"], "completed");

        let legal = category(&client, "demo", "legal");
        assert_eq!(legal["required"], 11);
        assert_eq!(legal["uploaded"], 7);
        assert_eq!(legal["folderStructure"][6]["id"], "financial-tax");
    }

    #[test]
    fn selection_toggle_and_clear() {
        let client = client();

        let toggled: Value = client
            .post("/api/deals/demo/selection/toggle")
            .json(&json!({ "document_id": "doc-legal-1" }))
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(toggled["selected"], true);

        client
            .post("/api/deals/demo/selection/toggle")
            .json(&json!({ "document_id": "doc-gone" }))
            .dispatch();

        let selection: Value = client
            .get("/api/deals/demo/selection")
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(selection["document_ids"], json!(["doc-gone", "doc-legal-1"]));
        assert_eq!(selection["documents"][0]["item_id"], "legal-1");

        let clear = client.delete("/api/deals/demo/selection").dispatch();
        assert_eq!(clear.status(), Status::Ok);

        let selection: Value = client
            .get("/api/deals/demo/selection")
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(selection["document_ids"], json!([]));
    }

    #[test]
    fn items_are_addressable_by_id() {
        let client = client();

        let item: Value = client
            .get("/api/deals/demo/items/financial-statements")
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(item["type"], "folder");
        assert_eq!(item["children"].as_array().unwrap().len(), 3);

        let missing = client.get("/api/deals/demo/items/nope").dispatch();
        assert_eq!(missing.status(), Status::NotFound);
    }
}
