pub mod engine;
pub mod gate;
pub mod models;
pub mod notify;
pub mod repository;
pub mod revenue;

pub use engine::FulfillmentEngine;
pub use models::{Order, OrderItem, OrderStatus, ShippingAddress};
pub use notify::{NotificationChannels, NotificationDispatcher};
pub use repository::{DailyRevenue, OrderStore, RevenueScope, RevenueStore};
pub use revenue::{RevenueAttributor, RevenueReport};
