use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Order, OrderItem, OrderStatus};
use mercato_core::FulfillmentError;

/// Persistence contract for orders and their line items.
///
/// `cas_update_status` is the only primitive that mutates shared order
/// state: a single atomic conditional write, not an application-level
/// read-then-write. All transition call sites go through it.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, order: &Order) -> Result<Uuid, FulfillmentError>;

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, FulfillmentError>;

    async fn list_orders(&self, customer_id: &str) -> Result<Vec<Order>, FulfillmentError>;

    /// Set `status = next` and stamp the corresponding stage timestamp, but
    /// only if the stored status still equals `expected`. Fails with
    /// `Conflict` when another actor advanced the order in between.
    async fn cas_update_status(
        &self,
        id: Uuid,
        expected: OrderStatus,
        next: OrderStatus,
        stamped_at: DateTime<Utc>,
    ) -> Result<Order, FulfillmentError>;

    /// Mark an item packed on behalf of `acting_site_id`. The site check is
    /// part of the store-level condition so no seller can touch another
    /// seller's items. Idempotent: an already-packed item keeps its original
    /// `packed_at`.
    async fn update_item_packed(
        &self,
        item_id: Uuid,
        acting_site_id: Uuid,
        packed_at: DateTime<Utc>,
    ) -> Result<OrderItem, FulfillmentError>;
}

/// Which party's revenue a query is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueScope {
    /// A seller storefront's share.
    Site(Uuid),
    /// The platform's commission across all sites.
    Platform,
}

/// One day's worth of attributed revenue, in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub amount: i64,
}

/// Persistence contract for per-site, per-day revenue buckets.
///
/// Buckets are written once per delivered-order event and range queries are
/// pure reads over them; range totals are summed from the stored series so
/// daily figures and totals can never disagree.
#[async_trait]
pub trait RevenueStore: Send + Sync {
    async fn accumulate(
        &self,
        site_id: Uuid,
        date: NaiveDate,
        seller_amount: i64,
        platform_amount: i64,
    ) -> Result<(), FulfillmentError>;

    /// Stored daily buckets within `[from, to]`, sorted by date. Days with
    /// no attributed revenue are omitted.
    async fn daily_series(
        &self,
        scope: RevenueScope,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyRevenue>, FulfillmentError>;
}
