use async_trait::async_trait;
use tracing::info;

use mercato_core::channel::{EmailSender, MessageSender};

/// Development mail channel: logs the message instead of delivering it.
/// Swap in a real SMTP/provider client behind the same trait in production.
pub struct LoggingEmailSender;

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        _body: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(%from, %to, %subject, "email dispatched");
        Ok(())
    }
}

/// Development message channel counterpart of `LoggingEmailSender`.
pub struct LoggingMessageSender;

#[async_trait]
impl MessageSender for LoggingMessageSender {
    async fn send(
        &self,
        sender_id: &str,
        phone: &str,
        _body: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(%sender_id, %phone, "message dispatched");
        Ok(())
    }
}
