//! Canned contacts and history used by the desktop and headless front ends.

use crate::common::{AuthorId, ConversationId, DeliveryStatus, Message, MessageId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub conversation: ConversationId,
    pub user_id: String,
    pub name: String,
    pub online: bool,
    pub last_message: String,
    pub last_message_time: String,
    pub unread: u32,
}

pub fn contacts() -> Vec<Contact> {
    [
        ("1", "user1", "Sarah Johnson", true, "Hey, how are you doing?", "10:30", 2),
        ("2", "user2", "Michael Chen", false, "Did you see that new movie?", "Yesterday", 0),
        ("3", "user3", "Alex Morgan", true, "The project is due tomorrow!", "Yesterday", 5),
        ("4", "user4", "Jamie Rivera", false, "Let's catch up this weekend", "Monday", 0),
    ]
    .into_iter()
    .map(
        |(conversation, user_id, name, online, last_message, time, unread)| Contact {
            conversation: ConversationId::new(conversation),
            user_id: user_id.to_string(),
            name: name.to_string(),
            online,
            last_message: last_message.to_string(),
            last_message_time: time.to_string(),
            unread,
        },
    )
    .collect()
}

pub fn find_contact<'a>(contacts: &'a [Contact], conversation: &ConversationId) -> Option<&'a Contact> {
    contacts
        .iter()
        .find(|contact| &contact.conversation == conversation)
}

/// Earlier messages of a conversation. Only the first conversation has any.
pub fn history(conversation: &ConversationId) -> Vec<Message> {
    if conversation.0 != "1" {
        return Vec::new();
    }

    let lines: [(&str, bool, &str); 7] = [
        ("10:15", false, "Hey there! How's it going?"),
        ("10:16", true, "I'm good, thanks! Just finishing up some work. How about you?"),
        ("10:18", false, "Pretty much the same. Been busy with that new project."),
        ("10:20", true, "Oh right! How's that going? Making good progress?"),
        ("10:22", false, "It's coming along nicely! Should be done by next week."),
        ("10:23", true, "That's great to hear! Let me know if you need any help."),
        (
            "10:25",
            false,
            "Actually, I could use your feedback on something if you have time this week?",
        ),
    ];

    lines
        .into_iter()
        .map(|(time, local, text)| Message {
            // reassigned when seeded into a session
            id: MessageId(0),
            text: text.to_string(),
            created_at: time.to_string(),
            timestamp: 0,
            author: if local {
                AuthorId::Local
            } else {
                AuthorId::Peer("user1".to_string())
            },
            status: DeliveryStatus::Read,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_conversation_has_read_history() {
        let history = history(&ConversationId::new("1"));
        assert_eq!(history.len(), 7);
        assert!(history.iter().all(|m| m.status == DeliveryStatus::Read));
        assert!(history[1].author.is_local());
    }

    #[test]
    fn other_conversations_start_empty() {
        assert!(history(&ConversationId::new("3")).is_empty());
    }

    #[test]
    fn contacts_are_found_by_conversation() {
        let contacts = contacts();
        let contact = find_contact(&contacts, &ConversationId::new("2")).unwrap();
        assert_eq!(contact.name, "Michael Chen");
        assert!(find_contact(&contacts, &ConversationId::new("9")).is_none());
    }
}
