use crate::domain::{Backend, MessageId, RoomId, UserId};

/// A message delivered by the chat host.
///
/// Backend-specific fields stay in the adapter; this is the common shape.
#[derive(Clone, Debug)]
pub struct IncomingMessage {
    pub backend: Backend,
    pub room_id: RoomId,
    pub message_id: MessageId,
    pub sender_id: UserId,
    pub sender_name: String,
    pub content: String,
    /// The message quotes another message.
    pub is_reply: bool,
    /// The message was sent by the bot account itself.
    pub is_from_self: bool,
}

impl IncomingMessage {
    /// An outgoing message to the same room, quoting this one.
    pub fn reply_with(&self, content: impl Into<String>) -> OutgoingMessage {
        OutgoingMessage {
            backend: self.backend,
            room_id: self.room_id.clone(),
            reply_to: Some(self.message_id.clone()),
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub backend: Backend,
    pub room_id: RoomId,
    pub reply_to: Option<MessageId>,
    pub content: String,
}

/// Capabilities / limits of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub supports_reply: bool,
    pub max_message_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incoming() -> IncomingMessage {
        IncomingMessage {
            backend: Backend::Tailchat,
            room_id: RoomId("room".to_string()),
            message_id: MessageId("m1".to_string()),
            sender_id: UserId("u1".to_string()),
            sender_name: "someone".to_string(),
            content: "/namer-help".to_string(),
            is_reply: false,
            is_from_self: false,
        }
    }

    #[test]
    fn reply_targets_same_room_and_quotes() {
        let out = incoming().reply_with("hi");
        assert_eq!(out.backend, Backend::Tailchat);
        assert_eq!(out.room_id, RoomId("room".to_string()));
        assert_eq!(out.reply_to, Some(MessageId("m1".to_string())));
        assert_eq!(out.content, "hi");
    }
}
