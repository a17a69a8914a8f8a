pub mod commands;
pub mod events;
pub mod types;

pub use commands::SessionCommand;
pub use events::{SessionEvent, SessionEventKind};
pub use types::{AuthorId, ConversationId, DeliveryStatus, Message, MessageId, SessionId};
