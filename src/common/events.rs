use serde::Serialize;

use crate::common::types::{ConversationId, DeliveryStatus, Message, MessageId, SessionId};

/// Events emitted by a session loop, tagged with the session they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionEvent {
    pub session: SessionId,
    pub conversation: ConversationId,
    pub kind: SessionEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEventKind {
    MessageAppended(Message),
    StatusChanged { id: MessageId, status: DeliveryStatus },
    PeerTyping { typing: bool },
    /// Last event of a session; its timers are gone.
    Closed,
}
