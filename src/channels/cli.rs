//! CLI channel — stdin/stdout REPL for local testing.
//!
//! Every line is treated as a message in a single fake group chat, which makes
//! the trigger rules easy to poke at without a bot token (mention the handle,
//! or `/autoreply on` with `ADMIN_IDS=0`).

use async_trait::async_trait;
use futures::stream;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::channels::{
    BotIdentity, Channel, IncomingMessage, MessageStream, OutgoingResponse,
};
use crate::error::ChannelError;

const CLI_CHAT_ID: &str = "cli-chat";
const CLI_SENDER_ID: &str = "0";

/// A simple CLI channel that reads from stdin and writes to stdout.
pub struct CliChannel {
    handle: String,
}

impl CliChannel {
    pub fn new(handle: &str) -> Self {
        Self {
            handle: handle.to_string(),
        }
    }
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    async fn identity(&self) -> Result<BotIdentity, ChannelError> {
        Ok(BotIdentity {
            id: "cli-bot".into(),
            username: self.handle.clone(),
        })
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            eprint!("> ");

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() {
                            eprint!("> ");
                            continue;
                        }
                        let msg = IncomingMessage::new("cli", CLI_CHAT_ID, CLI_SENDER_ID, &line)
                            .with_sender_name("local-user");
                        if tx.send(msg).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF
                    Err(e) => {
                        tracing::error!("Error reading stdin: {}", e);
                        break;
                    }
                }
            }
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn respond(
        &self,
        _msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError> {
        println!("\n{}\n", response.content);
        eprint!("> ");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), ChannelError> {
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ChannelError> {
        Ok(())
    }
}
