use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::deals::data::Deal;
use crate::internal_error::{InternalError, InternalResult};

pub type DealID = String;

/// One deal. Every request touching the deal holds this lock for the whole
/// operation, except across calls to the AI gateway.
pub type SharedDeal = Arc<Mutex<Deal>>;
pub type DealStore = Arc<Mutex<HashMap<DealID, SharedDeal>>>;

pub fn get_deal(deal_store: &DealStore, deal_id: &str) -> InternalResult<SharedDeal> {
    let deals = deal_store.lock()?;

    deals
        .get(deal_id)
        .cloned()
        .ok_or_else(|| InternalError::DealNotFound(deal_id.to_string()))
}

pub fn insert_deal(
    deal_store: &DealStore,
    deal_id: DealID,
    deal: Deal,
) -> InternalResult<()> {
    let mut deals = deal_store.lock()?;

    if deals.contains_key(&deal_id) {
        return Err(InternalError::DealExists(deal_id));
    }
    deals.insert(deal_id, Arc::new(Mutex::new(deal)));

    Ok(())
}

pub fn remove_deal(deal_store: &DealStore, deal_id: &str) -> InternalResult<()> {
    let mut deals = deal_store.lock()?;

    deals
        .remove(deal_id)
        .map(|_| ())
        .ok_or_else(|| InternalError::DealNotFound(deal_id.to_string()))
}

pub fn deal_ids(deal_store: &DealStore) -> InternalResult<Vec<DealID>> {
    let deals = deal_store.lock()?;

    let mut ids: Vec<DealID> = deals.keys().cloned().collect();
    ids.sort();

    Ok(ids)
}
