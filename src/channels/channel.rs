//! Channel trait and message types.

use std::pin::Pin;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::Stream;
use uuid::Uuid;

use crate::error::ChannelError;

/// An inbound group-chat message, normalized across channels.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Internal id for logging/tracing.
    pub id: String,
    /// Channel name ("telegram", "cli").
    pub channel: String,
    /// Chat the message arrived in.
    pub chat_id: String,
    /// Sender's channel-native user id.
    pub sender_id: String,
    /// Display name, when the channel provides one.
    pub sender_name: Option<String>,
    /// True for messages authored by bot accounts.
    pub sender_is_bot: bool,
    /// Message text, or caption for media messages.
    pub text: String,
    /// User id of the author of the message this one replies to, if any.
    pub reply_to_sender_id: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl IncomingMessage {
    pub fn new(channel: &str, chat_id: &str, sender_id: &str, text: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            channel: channel.to_string(),
            chat_id: chat_id.to_string(),
            sender_id: sender_id.to_string(),
            sender_name: None,
            sender_is_bot: false,
            text: text.to_string(),
            reply_to_sender_id: None,
            received_at: Utc::now(),
        }
    }

    pub fn with_sender_name(mut self, name: &str) -> Self {
        self.sender_name = Some(name.to_string());
        self
    }

    pub fn with_sender_is_bot(mut self, is_bot: bool) -> Self {
        self.sender_is_bot = is_bot;
        self
    }

    pub fn with_reply_to_sender(mut self, sender_id: &str) -> Self {
        self.reply_to_sender_id = Some(sender_id.to_string());
        self
    }
}

/// Outbound reply text.
#[derive(Debug, Clone)]
pub struct OutgoingResponse {
    pub content: String,
}

impl OutgoingResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// The bot's own identity on a channel, used for mention and reply-to-bot
/// detection.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    /// Channel-native user id of the bot account.
    pub id: String,
    /// Mention handle, without the leading `@`.
    pub username: String,
}

/// Stream of inbound messages produced by a started channel.
pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingMessage> + Send>>;

/// A message transport the bot can listen and reply on.
#[async_trait]
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    /// Resolve the bot's own identity on this channel.
    async fn identity(&self) -> Result<BotIdentity, ChannelError>;

    /// Start listening; returns the stream of inbound messages.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Send a reply into the chat the message came from. Best-effort: the
    /// caller logs failures and moves on, it never retries beyond what the
    /// channel itself does.
    async fn respond(
        &self,
        msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError>;

    async fn health_check(&self) -> Result<(), ChannelError>;

    async fn shutdown(&self) -> Result<(), ChannelError>;
}
