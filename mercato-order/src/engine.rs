use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::gate;
use crate::models::{Order, OrderItem, OrderStatus};
use crate::notify::NotificationDispatcher;
use crate::repository::OrderStore;
use crate::revenue::RevenueAttributor;
use mercato_core::FulfillmentError;

/// The fulfillment state machine.
///
/// Owns the legal transition table (via `OrderStatus::next`), enforces the
/// packing gate, and funnels every status mutation through the store's
/// single conditional-write primitive. Side effects (notification fan-out,
/// revenue attribution) are dispatched after the write succeeds and outside
/// its consistency boundary.
pub struct FulfillmentEngine {
    store: Arc<dyn OrderStore>,
    notifier: Arc<NotificationDispatcher>,
    attributor: Arc<RevenueAttributor>,
    platform_brand: String,
}

impl FulfillmentEngine {
    pub fn new(
        store: Arc<dyn OrderStore>,
        notifier: Arc<NotificationDispatcher>,
        attributor: Arc<RevenueAttributor>,
        platform_brand: String,
    ) -> Self {
        Self {
            store,
            notifier,
            attributor,
            platform_brand,
        }
    }

    /// Create an order with its items in one shot. Orders always start
    /// PENDING; the placement notification goes out best-effort.
    pub async fn place_order(&self, order: Order) -> Result<Order, FulfillmentError> {
        self.store.create_order(&order).await?;
        self.dispatch_notification(&order, OrderStatus::Pending);
        Ok(order)
    }

    /// Advance an order one step along the lifecycle.
    ///
    /// `target` validates an explicitly requested status against the
    /// computed next one; `None` means "advance to whatever is next".
    pub async fn advance(
        &self,
        order_id: Uuid,
        target: Option<OrderStatus>,
    ) -> Result<Order, FulfillmentError> {
        let order = self
            .store
            .get_order(order_id)
            .await?
            .ok_or_else(|| FulfillmentError::NotFound(order_id.to_string()))?;

        let Some(next) = order.status.next() else {
            return Err(FulfillmentError::InvalidTransition {
                from: order.status.to_string(),
                requested: target
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "NEXT".to_string()),
            });
        };
        if let Some(requested) = target {
            if requested != next {
                return Err(FulfillmentError::InvalidTransition {
                    from: order.status.to_string(),
                    requested: requested.to_string(),
                });
            }
        }

        // Re-evaluated at the moment of transition; packing flags move out
        // of band from this request.
        if !gate::ready_to_advance(&order, &self.platform_brand) {
            return Err(FulfillmentError::NotReady(
                "one or more seller items are not packed yet".to_string(),
            ));
        }

        let updated = self
            .store
            .cas_update_status(order_id, order.status, next, Utc::now())
            .await?;

        tracing::info!(%order_id, from = %order.status, to = %next, "order advanced");

        self.dispatch_notification(&updated, next);
        if next == OrderStatus::Delivered {
            let attributor = self.attributor.clone();
            let snapshot = updated.clone();
            tokio::spawn(async move {
                attributor.attribute(&snapshot).await;
            });
        }

        Ok(updated)
    }

    /// Seller-scoped packing mutation. Never triggers a transition by
    /// itself; advancing remains a separate, explicit call.
    pub async fn mark_packed(
        &self,
        item_id: Uuid,
        acting_site_id: Uuid,
    ) -> Result<OrderItem, FulfillmentError> {
        let item = self
            .store
            .update_item_packed(item_id, acting_site_id, Utc::now())
            .await?;
        tracing::debug!(%item_id, site_id = %acting_site_id, "item marked packed");
        Ok(item)
    }

    fn dispatch_notification(&self, order: &Order, status: OrderStatus) {
        let notifier = self.notifier.clone();
        let snapshot = order.clone();
        tokio::spawn(async move {
            notifier.notify(&snapshot, status).await;
        });
    }
}
