use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use mercato_core::directory::{CustomerDirectory, CustomerProfile, Site, SiteDirectory};
use mercato_core::FulfillmentError;
use mercato_order::models::{Order, OrderItem, OrderStatus};
use mercato_order::repository::{DailyRevenue, OrderStore, RevenueScope, RevenueStore};

#[derive(Debug, Default, Clone, Copy)]
struct RevenueBucket {
    seller: i64,
    platform: i64,
}

#[derive(Default)]
struct StoreState {
    orders: HashMap<Uuid, Order>,
    // item id -> owning order id
    item_index: HashMap<Uuid, Uuid>,
    sites: HashMap<Uuid, Site>,
    customers: HashMap<String, CustomerProfile>,
    revenue: BTreeMap<(Uuid, NaiveDate), RevenueBucket>,
}

/// In-process store backing the engine, the directories and the revenue
/// buckets.
///
/// All state sits behind one mutex, which is what makes `cas_update_status`
/// a genuine atomic conditional write rather than an application-level
/// read-then-write: the status comparison and the mutation happen under the
/// same lock acquisition.
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
        }
    }

    pub async fn register_site(&self, site: Site) {
        self.state.lock().await.sites.insert(site.id, site);
    }

    pub async fn register_customer(&self, profile: CustomerProfile) {
        self.state
            .lock()
            .await
            .customers
            .insert(profile.customer_id.clone(), profile);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create_order(&self, order: &Order) -> Result<Uuid, FulfillmentError> {
        let mut state = self.state.lock().await;
        for item in &order.items {
            state.item_index.insert(item.id, order.id);
        }
        state.orders.insert(order.id, order.clone());
        Ok(order.id)
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, FulfillmentError> {
        Ok(self.state.lock().await.orders.get(&id).cloned())
    }

    async fn list_orders(&self, customer_id: &str) -> Result<Vec<Order>, FulfillmentError> {
        let state = self.state.lock().await;
        let mut orders: Vec<Order> = state
            .orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn cas_update_status(
        &self,
        id: Uuid,
        expected: OrderStatus,
        next: OrderStatus,
        stamped_at: DateTime<Utc>,
    ) -> Result<Order, FulfillmentError> {
        let mut state = self.state.lock().await;
        let order = state
            .orders
            .get_mut(&id)
            .ok_or_else(|| FulfillmentError::NotFound(id.to_string()))?;

        if order.status != expected {
            return Err(FulfillmentError::Conflict {
                expected: expected.to_string(),
                actual: order.status.to_string(),
            });
        }

        order.status = next;
        order.set_stage_timestamp(next, stamped_at);
        Ok(order.clone())
    }

    async fn update_item_packed(
        &self,
        item_id: Uuid,
        acting_site_id: Uuid,
        packed_at: DateTime<Utc>,
    ) -> Result<OrderItem, FulfillmentError> {
        let mut state = self.state.lock().await;
        let order_id = *state
            .item_index
            .get(&item_id)
            .ok_or_else(|| FulfillmentError::NotFound(item_id.to_string()))?;
        let order = state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| FulfillmentError::NotFound(order_id.to_string()))?;
        let item = order
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| FulfillmentError::NotFound(item_id.to_string()))?;

        if item.site_id != Some(acting_site_id) {
            return Err(FulfillmentError::Forbidden(format!(
                "item {} does not belong to site {}",
                item_id, acting_site_id
            )));
        }

        // Idempotent: the first packed_at wins.
        if !item.packed {
            item.packed = true;
            item.packed_at = Some(packed_at);
        }
        Ok(item.clone())
    }
}

#[async_trait]
impl RevenueStore for MemoryStore {
    async fn accumulate(
        &self,
        site_id: Uuid,
        date: NaiveDate,
        seller_amount: i64,
        platform_amount: i64,
    ) -> Result<(), FulfillmentError> {
        let mut state = self.state.lock().await;
        let bucket = state.revenue.entry((site_id, date)).or_default();
        bucket.seller += seller_amount;
        bucket.platform += platform_amount;
        Ok(())
    }

    async fn daily_series(
        &self,
        scope: RevenueScope,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyRevenue>, FulfillmentError> {
        let state = self.state.lock().await;
        let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for ((site_id, date), bucket) in &state.revenue {
            if *date < from || *date > to {
                continue;
            }
            match scope {
                RevenueScope::Site(wanted) if *site_id == wanted => {
                    *per_day.entry(*date).or_default() += bucket.seller;
                }
                RevenueScope::Platform => {
                    *per_day.entry(*date).or_default() += bucket.platform;
                }
                _ => {}
            }
        }
        Ok(per_day
            .into_iter()
            .map(|(date, amount)| DailyRevenue { date, amount })
            .collect())
    }
}

#[async_trait]
impl SiteDirectory for MemoryStore {
    async fn site(
        &self,
        site_id: Uuid,
    ) -> Result<Option<Site>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.state.lock().await.sites.get(&site_id).cloned())
    }
}

#[async_trait]
impl CustomerDirectory for MemoryStore {
    async fn profile(
        &self,
        customer_id: &str,
    ) -> Result<Option<CustomerProfile>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.state.lock().await.customers.get(customer_id).cloned())
    }
}
