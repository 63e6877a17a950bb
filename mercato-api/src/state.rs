use std::sync::Arc;

use mercato_order::engine::FulfillmentEngine;
use mercato_order::revenue::RevenueAttributor;
use mercato_store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<FulfillmentEngine>,
    pub store: Arc<MemoryStore>,
    pub attributor: Arc<RevenueAttributor>,
}
