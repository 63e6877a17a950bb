use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order status in the fulfillment lifecycle.
///
/// PENDING is the only initial state and DELIVERED the only terminal one.
/// Advancing always moves exactly one step along the chain; there is no
/// cancelled or returned state in this table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// The legal transition table. `None` means the status is terminal.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery address snapshot captured at order creation. Not linked live to
/// the customer's address book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub line1: String,
    pub city: String,
    pub pincode: String,
}

/// The single source of truth for an order's status and stage timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: String,
    pub status: OrderStatus,
    pub total_amount: i64,
    pub payment_mode: String,
    pub address: ShippingAddress,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub out_for_delivery_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(customer_id: String, payment_mode: String, address: ShippingAddress) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            status: OrderStatus::Pending,
            total_amount: 0,
            payment_mode,
            address,
            items: Vec::new(),
            created_at: Utc::now(),
            confirmed_at: None,
            shipped_at: None,
            out_for_delivery_at: None,
            delivered_at: None,
        }
    }

    /// Add a line item. Items are created atomically with the order and are
    /// never individually deleted afterwards.
    pub fn add_item(&mut self, mut item: OrderItem) {
        item.order_id = self.id;
        self.total_amount += item.gross_amount();
        self.items.push(item);
    }

    /// Stamp the stage timestamp for `status`. Each stamp is set at most
    /// once; a second call for the same stage is a no-op.
    pub fn set_stage_timestamp(&mut self, status: OrderStatus, at: DateTime<Utc>) {
        let slot = match status {
            OrderStatus::Pending => return, // created_at is set at construction
            OrderStatus::Confirmed => &mut self.confirmed_at,
            OrderStatus::Shipped => &mut self.shipped_at,
            OrderStatus::OutForDelivery => &mut self.out_for_delivery_at,
            OrderStatus::Delivered => &mut self.delivered_at,
        };
        if slot.is_none() {
            *slot = Some(at);
        }
    }

    /// The stage timestamp recorded for `status`, if that stage was reached.
    pub fn stage_timestamp(&self, status: OrderStatus) -> Option<DateTime<Utc>> {
        match status {
            OrderStatus::Pending => Some(self.created_at),
            OrderStatus::Confirmed => self.confirmed_at,
            OrderStatus::Shipped => self.shipped_at,
            OrderStatus::OutForDelivery => self.out_for_delivery_at,
            OrderStatus::Delivered => self.delivered_at,
        }
    }
}

/// An individual line item within an order. Exclusively owned by its order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub brand_name: String,
    pub quantity: u32,
    /// Unit price in minor currency units.
    pub price: i64,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Owning seller storefront. `None` means the platform fulfills this
    /// item directly.
    pub site_id: Option<Uuid>,
    pub packed: bool,
    pub packed_at: Option<DateTime<Utc>>,
}

impl OrderItem {
    pub fn new(
        product_id: Uuid,
        name: String,
        brand_name: String,
        quantity: u32,
        price: i64,
        site_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id: Uuid::nil(),
            product_id,
            name,
            brand_name,
            quantity,
            price,
            size: None,
            color: None,
            site_id,
            // Platform items carry no seller to wait on.
            packed: site_id.is_none(),
            packed_at: None,
        }
    }

    pub fn gross_amount(&self) -> i64 {
        self.price * self.quantity as i64
    }
}
