use log::info;
use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::http::Header;
use rocket::{Build, Rocket};

use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

mod analysis;
mod config;
mod data;
mod deals;
mod documents;
mod internal_error;
mod sessions;

use analysis::gateway::GatewayClient;
use config::AppConfig;
use data::{insert_deal, DealStore};
use deals::data::Deal;
use documents::seed::{demo_categories, demo_deal_info};
use documents::tree::DocumentManager;
use internal_error::InternalResult;

#[macro_use]
extern crate rocket;

/// Answers browser preflight requests; the CORS headers come from the fairing.
#[options("/<_..>")]
fn preflight() {}

fn cors() -> AdHoc {
    AdHoc::on_response("CORS", |_, response| {
        Box::pin(async move {
            response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
            response.set_header(Header::new(
                "Access-Control-Allow-Headers",
                "authorization, x-client-info, apikey, content-type",
            ));
        })
    })
}

pub fn build_rocket(figment: Figment) -> InternalResult<Rocket<Build>> {
    let config: AppConfig = figment.extract()?;
    let gateway = GatewayClient::new(&config)?;

    let deal_store: DealStore = Arc::new(Mutex::new(HashMap::new()));
    if config.seed_demo_deal {
        insert_deal(
            &deal_store,
            config.demo_deal_id.clone(),
            Deal::new(demo_deal_info(), DocumentManager::from_seeds(demo_categories())?),
        )?;
        info!("Seeded demo deal {}", config.demo_deal_id);
    }

    Ok(rocket::custom(figment)
        .manage(deal_store)
        .manage(gateway)
        .attach(cors())
        .register("/", catchers![internal_error::json_catcher])
        .mount(
            "/api",
            routes![
                deals::endpoints::get_deals,
                deals::endpoints::create_deal,
                deals::endpoints::get_deal_summary,
                deals::endpoints::update_deal_info,
                deals::endpoints::delete_deal,
                documents::endpoints::get_categories,
                documents::endpoints::get_checklist,
                documents::endpoints::get_item,
                documents::endpoints::create_category,
                documents::endpoints::delete_category,
                documents::endpoints::rename_category,
                documents::endpoints::update_category_stats,
                documents::endpoints::create_folder,
                documents::endpoints::create_document,
                documents::endpoints::delete_item,
                documents::endpoints::rename_item,
                documents::endpoints::set_document_status,
                documents::endpoints::move_items,
                documents::endpoints::get_selection,
                documents::endpoints::toggle_document_selection,
                documents::endpoints::clear_selection,
                sessions::endpoints::get_sessions,
                sessions::endpoints::create_session,
                sessions::endpoints::get_session,
                sessions::endpoints::update_session,
                sessions::endpoints::delete_session,
                sessions::endpoints::get_outputs,
                sessions::endpoints::create_output,
                sessions::endpoints::delete_output,
                analysis::endpoints::analyze_documents,
                analysis::endpoints::generate_teaser,
                analysis::endpoints::analyze_selection,
                analysis::endpoints::summarize_session,
                analysis::endpoints::generate_session_teaser,
                preflight,
            ],
        ))
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    build_rocket(rocket::Config::figment())?.launch().await?;

    Ok(())
}
