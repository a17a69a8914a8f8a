use chrono::{DateTime, Utc};

use crate::common::{ConversationId, Message, SessionEvent, SessionEventKind};
use crate::demo::Contact;
use crate::session::ConversationState;

const MAX_DEBUG_EVENTS: usize = 100;

/// Entry of the session event log shown in the debug panel.
#[derive(Debug, Clone)]
pub struct DebugEvent {
    pub timestamp: DateTime<Utc>,
    pub event_type: &'static str,
    pub message: String,
}

/// Local UI mirror of the open conversation.
pub struct AppState {
    pub contacts: Vec<Contact>,
    pub selected: Option<ConversationId>,
    pub messages: Vec<Message>,
    pub peer_typing: bool,
    pub input_text: String,
    pub debug_events: Vec<DebugEvent>,
}

impl AppState {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            selected: None,
            messages: Vec::new(),
            peer_typing: false,
            input_text: String::new(),
            debug_events: Vec::new(),
        }
    }

    /// Switches the mirror to `conversation`, starting from the same history
    /// the session was seeded with.
    pub fn select(&mut self, conversation: ConversationId, history: Vec<Message>) {
        let mut seeded = ConversationState::new();
        seeded.seed_history(history);

        self.messages = seeded.messages().to_vec();
        self.peer_typing = false;
        self.input_text.clear();
        self.add_debug_event("OPENED", format!("Conversation {conversation} opened"));
        self.selected = Some(conversation);
    }

    pub fn apply_event(&mut self, event: SessionEvent) {
        if self.selected.as_ref() != Some(&event.conversation) {
            return;
        }

        match event.kind {
            SessionEventKind::MessageAppended(message) => {
                self.add_debug_event(
                    "MESSAGE_APPENDED",
                    format!("{} appended: {}", message.id, message.text),
                );
                self.messages.push(message);
            }
            SessionEventKind::StatusChanged { id, status } => {
                if let Some(message) = self.messages.iter_mut().find(|m| m.id == id) {
                    message.status = message.status.max(status);
                }
                self.add_debug_event("STATUS_CHANGED", format!("{id} is now {status:?}"));
            }
            SessionEventKind::PeerTyping { typing } => {
                self.peer_typing = typing;
                let text = if typing { "Peer started typing" } else { "Peer stopped typing" };
                self.add_debug_event("PEER_TYPING", text.to_string());
            }
            SessionEventKind::Closed => {
                self.add_debug_event("CLOSED", format!("Session {} closed", event.session));
            }
        }
    }

    pub fn add_debug_event(&mut self, event_type: &'static str, message: String) {
        self.debug_events.push(DebugEvent {
            timestamp: Utc::now(),
            event_type,
            message,
        });

        if self.debug_events.len() > MAX_DEBUG_EVENTS {
            self.debug_events.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{DeliveryStatus, MessageId, SessionId};
    use crate::demo;

    fn event(conversation: &str, kind: SessionEventKind) -> SessionEvent {
        SessionEvent {
            session: SessionId::random(),
            conversation: ConversationId::new(conversation),
            kind,
        }
    }

    #[test]
    fn select_renumbers_history_like_the_session() {
        let mut state = AppState::new(demo::contacts());
        let id = ConversationId::new("1");
        state.select(id.clone(), demo::history(&id));

        let ids: Vec<_> = state.messages.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn status_events_never_regress_the_mirror() {
        let mut state = AppState::new(demo::contacts());
        let id = ConversationId::new("1");
        state.select(id, demo::history(&ConversationId::new("1")));

        state.apply_event(event(
            "1",
            SessionEventKind::StatusChanged {
                id: MessageId(2),
                status: DeliveryStatus::Delivered,
            },
        ));
        assert_eq!(state.messages[1].status, DeliveryStatus::Read);
    }

    #[test]
    fn events_for_other_conversations_are_ignored() {
        let mut state = AppState::new(demo::contacts());
        state.select(ConversationId::new("2"), Vec::new());

        state.apply_event(event("1", SessionEventKind::PeerTyping { typing: true }));
        assert!(!state.peer_typing);

        state.apply_event(event("2", SessionEventKind::PeerTyping { typing: true }));
        assert!(state.peer_typing);
    }

    #[test]
    fn debug_log_is_bounded() {
        let mut state = AppState::new(Vec::new());
        for i in 0..(MAX_DEBUG_EVENTS + 10) {
            state.add_debug_event("TEST", i.to_string());
        }
        assert_eq!(state.debug_events.len(), MAX_DEBUG_EVENTS);
        assert_eq!(state.debug_events[0].message, "10");
    }
}
