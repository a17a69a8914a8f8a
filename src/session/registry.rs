use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::common::{ConversationId, Message, SessionEvent};
use crate::config::SimulationConfig;

use super::driver::{ConversationSession, SessionHandle};

const EVENT_BUFFER: usize = 100;

/// Open sessions, at most one per conversation. All sessions report into the
/// event channel handed out by [`SessionRegistry::new`].
pub struct SessionRegistry {
    config: SimulationConfig,
    sessions: HashMap<ConversationId, SessionHandle>,
    events: mpsc::Sender<SessionEvent>,
}

impl SessionRegistry {
    pub fn new(config: SimulationConfig) -> (Self, mpsc::Receiver<SessionEvent>) {
        let (events, event_rx) = mpsc::channel(EVENT_BUFFER);
        let registry = Self {
            config,
            sessions: HashMap::new(),
            events,
        };
        (registry, event_rx)
    }

    /// Returns the live session for `conversation`, starting one seeded with
    /// `history` if none is open. `history` is ignored for a live session.
    /// Must be called inside a tokio runtime.
    pub fn open(&mut self, conversation: ConversationId, history: Vec<Message>) -> &SessionHandle {
        let config = &self.config;
        let events = &self.events;
        self.sessions
            .entry(conversation.clone())
            .or_insert_with(|| {
                ConversationSession::open(conversation, history, config.clone(), events.clone())
            })
    }

    pub fn get(&self, conversation: &ConversationId) -> Option<&SessionHandle> {
        self.sessions.get(conversation)
    }

    /// Tears down the session of `conversation`, cancelling its timers.
    /// Returns false when nothing was open.
    pub fn close(&mut self, conversation: &ConversationId) -> bool {
        match self.sessions.remove(conversation) {
            Some(handle) => {
                log::info!("Closing session {} ({conversation})", handle.id());
                drop(handle);
                true
            }
            None => false,
        }
    }

    /// Like [`close`](Self::close) but waits until the session loop is gone.
    pub async fn close_and_wait(&mut self, conversation: &ConversationId) -> bool {
        match self.sessions.remove(conversation) {
            Some(handle) => {
                handle.close().await;
                true
            }
            None => false,
        }
    }

    pub async fn close_all(&mut self) {
        for (_, handle) in self.sessions.drain() {
            handle.close().await;
        }
    }

    /// True when `event` comes from the session currently open for its
    /// conversation, as opposed to one that was already closed.
    pub fn is_current(&self, event: &SessionEvent) -> bool {
        self.sessions
            .get(&event.conversation)
            .is_some_and(|handle| handle.id() == event.session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
