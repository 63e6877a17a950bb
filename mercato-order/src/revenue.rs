use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Order;
use crate::repository::{DailyRevenue, RevenueScope, RevenueStore};
use mercato_core::directory::SiteDirectory;
use mercato_core::FulfillmentError;

/// Daily series plus range total for one scope. The total is summed from the
/// series, never re-derived, so `total == Σ daily` holds by construction.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueReport {
    pub daily: Vec<DailyRevenue>,
    pub total: i64,
}

/// Splits delivered-order value between sellers and the platform and
/// accumulates it into per-site, per-day buckets.
pub struct RevenueAttributor {
    store: Arc<dyn RevenueStore>,
    sites: Arc<dyn SiteDirectory>,
}

impl RevenueAttributor {
    pub fn new(store: Arc<dyn RevenueStore>, sites: Arc<dyn SiteDirectory>) -> Self {
        Self { store, sites }
    }

    /// Attribute revenue for a delivered order. Invoked once per order, off
    /// the transition's request path; failures are logged for offline
    /// remediation, never surfaced.
    pub async fn attribute(&self, order: &Order) {
        let Some(delivered_at) = order.delivered_at else {
            tracing::warn!(order_id = %order.id, "attribution requested before delivery stamp");
            return;
        };
        // Buckets key on the delivery date, not the order date.
        let date = delivered_at.date_naive();

        for item in &order.items {
            let Some(site_id) = item.site_id else {
                // Platform-fulfilled items carry no seller share.
                continue;
            };

            let site = match self.sites.site(site_id).await {
                Ok(Some(site)) => site,
                Ok(None) => {
                    tracing::warn!(%site_id, item_id = %item.id, "unknown site, skipping attribution");
                    continue;
                }
                Err(e) => {
                    tracing::error!(%site_id, item_id = %item.id, error = %e, "site lookup failed");
                    continue;
                }
            };

            let (seller, platform) = split_revenue(item.gross_amount(), site.revenue_share_rate);
            if let Err(e) = self.store.accumulate(site_id, date, seller, platform).await {
                tracing::error!(order_id = %order.id, %site_id, error = %e, "revenue accumulation failed");
            }
        }
    }

    /// Range report for a site's share or the platform's commission.
    pub async fn report(
        &self,
        scope: RevenueScope,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RevenueReport, FulfillmentError> {
        let daily = self.store.daily_series(scope, from, to).await?;
        let total = daily.iter().map(|d| d.amount).sum();
        Ok(RevenueReport { daily, total })
    }
}

/// Split a gross item amount into (seller, platform) shares. The seller
/// share is rounded; the platform keeps the exact remainder so the two
/// always sum back to the gross amount.
pub fn split_revenue(gross: i64, revenue_share_rate: f64) -> (i64, i64) {
    let seller = (gross as f64 * revenue_share_rate).round() as i64;
    (seller, gross - seller)
}
