use async_trait::async_trait;

/// Electronic-mail delivery channel. Implementations are fire-and-forget
/// from the engine's perspective; a returned error is logged, never retried.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Short-message delivery channel (SMS or equivalent).
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(
        &self,
        sender_id: &str,
        phone: &str,
        body: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
