use async_trait::async_trait;

use crate::application::errors::BotError;

/// ReplySink trait - the platform's "reply to this message" primitive.
///
/// An implementation is bound to one target message and must not ping
/// the original author.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_reply(&self, text: &str) -> Result<(), BotError>;
}
