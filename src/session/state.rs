use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::common::{AuthorId, DeliveryStatus, Message, MessageId};
use crate::error::{SessionError, SessionResult};

/// In-memory state of one open conversation.
///
/// The message list is append-only and ids grow with list position, so a
/// message's id also tells where it sits in the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversationState {
    messages: Vec<Message>,
    peer_typing: bool,
    next_id: u64,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn peer_typing(&self) -> bool {
        self.peer_typing
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == id)
    }

    /// Loads earlier conversation history. Ids are reassigned so they keep
    /// increasing along the list.
    pub fn seed_history(&mut self, history: impl IntoIterator<Item = Message>) {
        for mut message in history {
            message.id = self.allocate_id();
            self.messages.push(message);
        }
    }

    /// Appends a local message in the `Sent` state. Blank text is rejected
    /// and leaves the state untouched.
    pub fn submit<Tz>(&mut self, text: &str, now: DateTime<Tz>) -> SessionResult<&Message>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.append(AuthorId::Local, text, DeliveryStatus::Sent, now)
    }

    /// Appends a message written by the remote participant. Incoming messages
    /// are already read by the time they are shown.
    pub fn receive_peer<Tz>(
        &mut self,
        author: &str,
        text: &str,
        now: DateTime<Tz>,
    ) -> SessionResult<&Message>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.append(
            AuthorId::Peer(author.to_string()),
            text,
            DeliveryStatus::Read,
            now,
        )
    }

    /// Moves local message `id` forward to `target`.
    ///
    /// Receipts are cumulative: every earlier local message still behind
    /// `target` moves with it. Each message advances one state at a time, so
    /// the returned transitions never skip a state and are ordered oldest
    /// message first. Messages already at or past `target` are left alone.
    pub fn advance(
        &mut self,
        id: MessageId,
        target: DeliveryStatus,
    ) -> SessionResult<Vec<(MessageId, DeliveryStatus)>> {
        let position = self
            .messages
            .iter()
            .position(|message| message.id == id)
            .ok_or(SessionError::MessageNotFound(id))?;

        let mut applied = Vec::new();
        for message in self.messages[..=position]
            .iter_mut()
            .filter(|message| message.author.is_local())
        {
            while message.status < target {
                let Some(next) = message.status.next() else {
                    break;
                };
                message.status = next;
                applied.push((message.id, next));
            }
        }
        Ok(applied)
    }

    /// Returns true when the flag actually changed.
    pub fn set_peer_typing(&mut self, typing: bool) -> bool {
        let changed = self.peer_typing != typing;
        self.peer_typing = typing;
        changed
    }

    fn append<Tz>(
        &mut self,
        author: AuthorId,
        text: &str,
        status: DeliveryStatus,
        now: DateTime<Tz>,
    ) -> SessionResult<&Message>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        let message = Message {
            id: self.allocate_id(),
            text: text.to_string(),
            created_at: now.format("%H:%M").to_string(),
            timestamp: now.timestamp(),
            author,
            status,
        };
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    fn allocate_id(&mut self) -> MessageId {
        self.next_id += 1;
        MessageId(self.next_id)
    }
}
