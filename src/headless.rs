//! Terminal front end: one conversation driven from stdin, events printed as
//! JSON lines on stdout.

use std::error::Error;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::common::{ConversationId, SessionEventKind};
use crate::config::AppConfig;
use crate::demo;
use crate::error::SessionError;
use crate::session::SessionRegistry;

const QUIT_COMMAND: &str = "/quit";

pub async fn run(
    config: AppConfig,
    conversation: ConversationId,
    linger: Duration,
) -> Result<(), Box<dyn Error>> {
    let (mut registry, mut events) = SessionRegistry::new(config.simulation);
    let snapshot = registry
        .open(conversation.clone(), demo::history(&conversation))
        .snapshot()
        .await?;
    for message in snapshot.messages() {
        println!("{}", serde_json::to_string(message)?);
    }

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(err) => log::warn!("Failed to serialize event: {err}"),
            }
            if event.kind == SessionEventKind::Closed {
                break;
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == QUIT_COMMAND {
            break;
        }
        let Some(session) = registry.get(&conversation) else {
            break;
        };
        match session.submit_message(&line).await {
            Ok(()) => {}
            Err(SessionError::EmptyMessage) => log::debug!("Skipping blank line"),
            Err(err) => {
                log::error!("Session stopped accepting messages: {err}");
                break;
            }
        }
    }

    // give in-flight receipts and replies a chance to land
    tokio::time::sleep(linger).await;
    registry.close_and_wait(&conversation).await;
    // last sender gone, so the printer ends even if `Closed` was skipped
    drop(registry);
    printer.await?;
    Ok(())
}
