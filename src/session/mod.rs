//! Conversation sessions: per-conversation message state and the timeline
//! that moves messages through `Sent -> Delivered -> Read`.

pub mod driver;
pub mod registry;
pub mod state;

pub use driver::{ConversationSession, SessionHandle, SIMULATED_PEER};
pub use registry::SessionRegistry;
pub use state::ConversationState;
