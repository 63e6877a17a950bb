use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use mercato_core::FulfillmentError;
use mercato_order::models::{Order, OrderItem, OrderStatus, ShippingAddress};

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub payment_mode: String,
    pub address: AddressRequest,
    pub items: Vec<ItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub line1: String,
    pub city: String,
    pub pincode: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub product_id: Uuid,
    pub name: String,
    pub brand_name: String,
    pub quantity: u32,
    /// Unit price in minor currency units.
    pub price: i64,
    pub size: Option<String>,
    pub color: Option<String>,
    pub site_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    /// Explicit target status; omitted means "advance to whatever is next".
    #[serde(default)]
    pub target: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct MarkPackedRequest {
    pub site_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub customer_id: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/orders
/// Create an order with its line items in one atomic write.
pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    if req.items.is_empty() {
        return Err(ApiError::BadRequest(
            "an order needs at least one item".to_string(),
        ));
    }

    let address = ShippingAddress {
        name: req.address.name,
        email: req.address.email,
        phone: req.address.phone,
        line1: req.address.line1,
        city: req.address.city,
        pincode: req.address.pincode,
    };
    let mut order = Order::new(req.customer_id, req.payment_mode, address);
    for item_req in req.items {
        let mut item = OrderItem::new(
            item_req.product_id,
            item_req.name,
            item_req.brand_name,
            item_req.quantity,
            item_req.price,
            item_req.site_id,
        );
        item.size = item_req.size;
        item.color = item_req.color;
        order.add_item(item);
    }

    let order = state.engine.place_order(order).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    use mercato_order::repository::OrderStore;

    let order = state
        .store
        .get_order(order_id)
        .await?
        .ok_or_else(|| FulfillmentError::NotFound(order_id.to_string()))?;
    Ok(Json(order))
}

/// GET /v1/orders?customer_id=...
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    use mercato_order::repository::OrderStore;

    let orders = state.store.list_orders(&query.customer_id).await?;
    Ok(Json(orders))
}

/// POST /v1/orders/{id}/advance
/// Advance an order one step along the fulfillment lifecycle.
pub async fn advance_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(req): Json<AdvanceRequest>,
) -> Result<Json<Order>, ApiError> {
    let order = state.engine.advance(order_id, req.target).await?;
    Ok(Json(order))
}

/// POST /v1/order-items/{id}/packed
/// Seller marks one of their own line items as packed.
pub async fn mark_packed(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(req): Json<MarkPackedRequest>,
) -> Result<Json<OrderItem>, ApiError> {
    let item = state.engine.mark_packed(item_id, req.site_id).await?;
    Ok(Json(item))
}
