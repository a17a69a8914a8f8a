use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id of a message inside one session. Assigned at append time, strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Route key of a conversation screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One opened instance of a conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorId {
    Local,
    Peer(String),
}

impl AuthorId {
    pub fn is_local(&self) -> bool {
        matches!(self, AuthorId::Local)
    }
}

/// Delivery lifecycle of an outgoing message. Variants are declared in
/// lifecycle order so `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
}

impl DeliveryStatus {
    pub fn next(self) -> Option<Self> {
        match self {
            DeliveryStatus::Sent => Some(DeliveryStatus::Delivered),
            DeliveryStatus::Delivered => Some(DeliveryStatus::Read),
            DeliveryStatus::Read => None,
        }
    }
}

/// A chat message as shown on the conversation screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    /// Display time, `HH:MM`.
    pub created_at: String,
    pub timestamp: i64,
    pub author: AuthorId,
    pub status: DeliveryStatus,
}
