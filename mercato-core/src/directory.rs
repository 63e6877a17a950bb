use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A seller storefront onboarded onto the platform.
///
/// `revenue_share_rate` is the fixed fraction of a delivered item's value
/// credited to the seller; the remainder is platform commission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: Uuid,
    pub owner_id: String,
    pub revenue_share_rate: f64,
}

impl Site {
    pub fn new(owner_id: String, revenue_share_rate: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            revenue_share_rate,
        }
    }
}

/// Account-level contact record, used as the fallback when an order's
/// address snapshot carries no usable contact details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Lookup of seller storefronts by id.
#[async_trait]
pub trait SiteDirectory: Send + Sync {
    async fn site(
        &self,
        site_id: Uuid,
    ) -> Result<Option<Site>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Lookup of customer contact profiles by account id.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn profile(
        &self,
        customer_id: &str,
    ) -> Result<Option<CustomerProfile>, Box<dyn std::error::Error + Send + Sync>>;
}
