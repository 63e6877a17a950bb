use std::sync::Arc;

use crate::models::{Order, OrderStatus};
use mercato_core::channel::{EmailSender, MessageSender};
use mercato_core::directory::CustomerDirectory;

/// Channel configuration. A channel is attempted only when its credential
/// is present.
#[derive(Debug, Clone, Default)]
pub struct NotificationChannels {
    /// From-address for the mail channel.
    pub sender_email: Option<String>,
    /// Registered sender id for the message channel.
    pub message_sender_id: Option<String>,
}

/// Resolved delivery target for one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Best-effort, multi-channel notification fan-out.
///
/// `notify` never fails from the caller's point of view: each channel is
/// attempted independently, and a channel failure is logged and swallowed.
/// Notification sits outside the transition's consistency boundary; only the
/// order status itself is guaranteed consistent.
pub struct NotificationDispatcher {
    email: Arc<dyn EmailSender>,
    messages: Arc<dyn MessageSender>,
    customers: Arc<dyn CustomerDirectory>,
    channels: NotificationChannels,
}

impl NotificationDispatcher {
    pub fn new(
        email: Arc<dyn EmailSender>,
        messages: Arc<dyn MessageSender>,
        customers: Arc<dyn CustomerDirectory>,
        channels: NotificationChannels,
    ) -> Self {
        Self {
            email,
            messages,
            customers,
            channels,
        }
    }

    pub async fn notify(&self, order: &Order, status: OrderStatus) {
        let recipient = self.resolve_recipient(order).await;
        let (subject, body) = render_message(order, status, &recipient.name);

        if let (Some(from), Some(to)) = (&self.channels.sender_email, &recipient.email) {
            if let Err(e) = self.email.send(from, to, &subject, &body).await {
                tracing::warn!(order_id = %order.id, %to, error = %e, "email notification failed");
            }
        }

        if let (Some(sender_id), Some(phone)) =
            (&self.channels.message_sender_id, &recipient.phone)
        {
            if let Err(e) = self.messages.send(sender_id, phone, &body).await {
                tracing::warn!(order_id = %order.id, %phone, error = %e, "message notification failed");
            }
        }
    }

    /// Precedence: the order's address snapshot, then the account profile,
    /// then drop the channel that has no target.
    async fn resolve_recipient(&self, order: &Order) -> Recipient {
        let profile = match self.customers.profile(&order.customer_id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(customer_id = %order.customer_id, error = %e, "profile lookup failed");
                None
            }
        };

        let name = if !order.address.name.is_empty() {
            order.address.name.clone()
        } else {
            profile
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "customer".to_string())
        };
        let email = order
            .address
            .email
            .clone()
            .or_else(|| profile.as_ref().and_then(|p| p.email.clone()));
        let phone = order
            .address
            .phone
            .clone()
            .or_else(|| profile.as_ref().and_then(|p| p.phone.clone()));

        Recipient { name, email, phone }
    }
}

/// Human-readable template per reachable status.
fn render_message(order: &Order, status: OrderStatus, name: &str) -> (String, String) {
    let short_id = order.id.simple().to_string()[..8].to_uppercase();
    match status {
        OrderStatus::Pending => (
            format!("Order #{} placed", short_id),
            format!(
                "Hi {}, we have received your order #{} for a total of {}. We will confirm it shortly.",
                name,
                short_id,
                format_amount(order.total_amount)
            ),
        ),
        OrderStatus::Confirmed => (
            format!("Order #{} confirmed", short_id),
            format!(
                "Hi {}, your order #{} is confirmed and is being prepared for dispatch.",
                name, short_id
            ),
        ),
        OrderStatus::Shipped => (
            format!("Order #{} shipped", short_id),
            format!(
                "Hi {}, your order #{} has been shipped to {}, {}.",
                name, short_id, order.address.city, order.address.pincode
            ),
        ),
        OrderStatus::OutForDelivery => (
            format!("Order #{} out for delivery", short_id),
            format!(
                "Hi {}, your order #{} is out for delivery and should reach you today.",
                name, short_id
            ),
        ),
        OrderStatus::Delivered => (
            format!("Order #{} delivered", short_id),
            format!(
                "Hi {}, your order #{} has been delivered. Thank you for shopping with us!",
                name, short_id
            ),
        ),
    }
}

fn format_amount(minor: i64) -> String {
    format!("₹{}.{:02}", minor / 100, minor % 100)
}
