use tokio::sync::oneshot;

use crate::session::ConversationState;

/// Commands a front end sends to a running session loop.
#[derive(Debug)]
pub enum SessionCommand {
    /// Text has already been checked to be non-blank by the handle.
    Submit(String),
    /// A message pushed by the remote participant.
    PeerMessage { author: String, text: String },
    /// Ask the loop for a copy of its current state.
    Snapshot(oneshot::Sender<ConversationState>),
}
