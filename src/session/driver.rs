use chrono::Local;
use futures::StreamExt;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::time::DelayQueue;

use crate::common::{
    ConversationId, DeliveryStatus, Message, MessageId, SessionCommand, SessionEvent,
    SessionEventKind, SessionId,
};
use crate::config::SimulationConfig;
use crate::error::{SessionError, SessionResult};

use super::state::ConversationState;

const COMMAND_BUFFER: usize = 64;

/// Author id used for simulated replies.
pub const SIMULATED_PEER: &str = "peer";

/// Deferred work on the session timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Deliver(MessageId),
    Read(MessageId),
    TypingStart,
    Reply,
}

/// Front-end side of a running session.
///
/// Dropping the handle cancels the session: pending timers are discarded and
/// the loop stops at its next step.
#[derive(Debug)]
pub struct SessionHandle {
    id: SessionId,
    conversation: ConversationId,
    commands: mpsc::Sender<SessionCommand>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SessionHandle {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn conversation(&self) -> &ConversationId {
        &self.conversation
    }

    /// Queues `text` for sending. Blank text is rejected here and never
    /// reaches the session.
    pub async fn submit_message(&self, text: &str) -> SessionResult<()> {
        ensure_not_blank(text)?;
        self.commands
            .send(SessionCommand::Submit(text.to_string()))
            .await
            .map_err(|_| SessionError::SessionClosed)
    }

    /// Non-blocking variant of [`submit_message`](Self::submit_message) for
    /// callers outside the runtime, such as the UI thread.
    pub fn try_submit_message(&self, text: &str) -> SessionResult<()> {
        ensure_not_blank(text)?;
        self.commands
            .try_send(SessionCommand::Submit(text.to_string()))
            .map_err(|err| match err {
                TrySendError::Full(_) => SessionError::QueueFull,
                TrySendError::Closed(_) => SessionError::SessionClosed,
            })
    }

    /// Delivers a message written by the remote participant.
    pub async fn receive_peer_message(&self, author: &str, text: &str) -> SessionResult<()> {
        ensure_not_blank(text)?;
        self.commands
            .send(SessionCommand::PeerMessage {
                author: author.to_string(),
                text: text.to_string(),
            })
            .await
            .map_err(|_| SessionError::SessionClosed)
    }

    pub async fn snapshot(&self) -> SessionResult<ConversationState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(SessionCommand::Snapshot(reply_tx))
            .await
            .map_err(|_| SessionError::SessionClosed)?;
        reply_rx.await.map_err(|_| SessionError::SessionClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancels the session and waits for its loop to finish. No event other
    /// than the final `Closed` is emitted once this starts, and `Closed` is
    /// dropped if the event channel is full.
    pub async fn close(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                log::warn!("Session {} ended abnormally: {err}", self.id);
            }
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn ensure_not_blank(text: &str) -> SessionResult<()> {
    if text.trim().is_empty() {
        return Err(SessionError::EmptyMessage);
    }
    Ok(())
}

/// Session loop for one conversation.
///
/// Owns the conversation state and every pending timer. All state changes
/// happen on this one task, in the order their timers expire.
pub struct ConversationSession {
    id: SessionId,
    conversation: ConversationId,
    state: ConversationState,
    config: SimulationConfig,
    timers: DelayQueue<Timer>,
    /// Replies between `TypingStart` and `Reply`.
    composing: usize,
    rng: StdRng,
    commands: mpsc::Receiver<SessionCommand>,
    events: mpsc::Sender<SessionEvent>,
    cancel: CancellationToken,
}

impl ConversationSession {
    /// Spawns the loop for `conversation` on the current tokio runtime.
    pub fn open(
        conversation: ConversationId,
        history: Vec<Message>,
        config: SimulationConfig,
        events: mpsc::Sender<SessionEvent>,
    ) -> SessionHandle {
        let id = SessionId::random();
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let cancel = CancellationToken::new();

        let mut state = ConversationState::new();
        state.seed_history(history);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let session = ConversationSession {
            id,
            conversation: conversation.clone(),
            state,
            config,
            timers: DelayQueue::new(),
            composing: 0,
            rng,
            commands: command_rx,
            events,
            cancel: cancel.clone(),
        };
        let task = tokio::spawn(session.run());

        SessionHandle {
            id,
            conversation,
            commands: command_tx,
            cancel,
            task: Some(task),
        }
    }

    async fn run(mut self) {
        log::info!(
            "Session {} opened for conversation {}",
            self.id,
            self.conversation
        );

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                command = self.commands.recv() => {
                    if let Some(command) = command {
                        self.handle_command(command).await;
                    } else {
                        break;
                    }
                }
                Some(expired) = self.timers.next(), if !self.timers.is_empty() => {
                    self.handle_timer(expired.into_inner()).await;
                }
            }
        }

        let pending = self.timers.len();
        self.timers.clear();
        log::info!(
            "Session {} closed, {} pending timer(s) cancelled",
            self.id,
            pending
        );
        self.emit_closed();
    }

    async fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Submit(text) => {
                let message = match self.state.submit(&text, Local::now()) {
                    Ok(message) => message.clone(),
                    Err(err) => {
                        log::debug!("Session {} ignored submit: {err}", self.id);
                        return;
                    }
                };
                self.timers
                    .insert(Timer::Deliver(message.id), self.config.deliver_after());
                log::debug!("Session {} appended {}", self.id, message.id);
                self.emit(SessionEventKind::MessageAppended(message)).await;
            }
            SessionCommand::PeerMessage { author, text } => {
                match self.state.receive_peer(&author, &text, Local::now()) {
                    Ok(message) => {
                        let message = message.clone();
                        self.emit(SessionEventKind::MessageAppended(message)).await;
                    }
                    Err(err) => log::debug!("Session {} ignored peer message: {err}", self.id),
                }
            }
            SessionCommand::Snapshot(reply) => {
                if reply.send(self.state.clone()).is_err() {
                    log::debug!("Snapshot requester for session {} went away", self.id);
                }
            }
        }
    }

    async fn handle_timer(&mut self, timer: Timer) {
        match timer {
            Timer::Deliver(id) => self.advance(id, DeliveryStatus::Delivered).await,
            Timer::Read(id) => self.advance(id, DeliveryStatus::Read).await,
            Timer::TypingStart => {
                self.composing += 1;
                self.set_typing(true).await;
                self.timers.insert(Timer::Reply, self.config.reply_after());
            }
            Timer::Reply => self.send_reply().await,
        }
    }

    async fn advance(&mut self, id: MessageId, target: DeliveryStatus) {
        let transitions = match self.state.advance(id, target) {
            Ok(transitions) => transitions,
            Err(err) => {
                log::warn!("Session {} dropped {target:?} receipt: {err}", self.id);
                return;
            }
        };

        for (id, status) in transitions {
            log::debug!("Session {} {} -> {status:?}", self.id, id);
            self.emit(SessionEventKind::StatusChanged { id, status }).await;
            match status {
                DeliveryStatus::Delivered => {
                    self.timers
                        .insert(Timer::Read(id), self.config.read_after());
                }
                DeliveryStatus::Read => self.roll_reply(),
                DeliveryStatus::Sent => {}
            }
        }
    }

    fn roll_reply(&mut self) {
        if self.rng.gen_bool(self.config.reply_chance()) {
            self.timers
                .insert(Timer::TypingStart, self.config.typing_after());
        }
    }

    async fn send_reply(&mut self) {
        self.composing = self.composing.saturating_sub(1);
        // typing goes down before the reply shows up
        self.set_typing(false).await;

        let Some(text) = self.config.replies.choose(&mut self.rng).cloned() else {
            log::warn!("Session {} has no canned replies configured", self.id);
            return;
        };
        match self
            .state
            .receive_peer(SIMULATED_PEER, &text, Local::now())
        {
            Ok(message) => {
                let message = message.clone();
                self.emit(SessionEventKind::MessageAppended(message)).await;
            }
            Err(err) => log::warn!("Session {} could not append reply: {err}", self.id),
        }

        if self.composing > 0 {
            self.set_typing(true).await;
        }
    }

    async fn set_typing(&mut self, typing: bool) {
        if self.state.set_peer_typing(typing) {
            self.emit(SessionEventKind::PeerTyping { typing }).await;
        }
    }

    /// Sends an event unless the session is cancelled first.
    async fn emit(&self, kind: SessionEventKind) {
        let event = self.event(kind);
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                log::debug!("Session {} dropped an event during teardown", self.id);
            }
            sent = self.events.send(event) => {
                if let Err(err) = sent {
                    log::warn!("Failed to deliver session event: {err}");
                }
            }
        }
    }

    /// `Closed` is best effort: it is skipped when the channel is full.
    fn emit_closed(&self) {
        if let Err(err) = self.events.try_send(self.event(SessionEventKind::Closed)) {
            log::warn!("Session {} could not report close: {err}", self.id);
        }
    }

    fn event(&self, kind: SessionEventKind) -> SessionEvent {
        SessionEvent {
            session: self.id,
            conversation: self.conversation.clone(),
            kind,
        }
    }
}
