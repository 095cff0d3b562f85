use async_trait::async_trait;

use crate::{
    domain::MessageId,
    messaging::types::{MessagingCapabilities, OutgoingMessage},
    Result,
};

/// Outbound side of the chat host.
///
/// Each backend adapter implements this; the plugin only ever talks to the trait.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    async fn send_message(&self, msg: &OutgoingMessage) -> Result<MessageId>;
}
