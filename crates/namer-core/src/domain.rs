use std::fmt;

/// Which chat backend a message came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    Ica,
    Tailchat,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Ica => f.write_str("ica"),
            Backend::Tailchat => f.write_str("tailchat"),
        }
    }
}

/// Room (group or private chat) id. Backends disagree on the shape, so keep it opaque.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RoomId(pub String);

/// Sender id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

/// Message id as assigned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub String);
