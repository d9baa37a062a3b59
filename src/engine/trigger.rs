//! Trigger gating — should the bot reply to this message at all?
//!
//! A reply is permitted when any of three conditions hold: the chat has
//! autoreply enabled, the message replies to one of the bot's own messages,
//! or the text mentions the bot's handle. Bot senders never get a reply, and
//! a per-sender cooldown suppresses rapid-fire responses.

use std::collections::HashMap;

use crate::channels::{BotIdentity, IncomingMessage};

/// Minimum interval between replies to the same sender in the same chat.
pub const COOLDOWN_SECS: i64 = 6;

/// Why the gate passed or refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerDecision {
    /// Reply; the cooldown timestamp has been recorded.
    Reply,
    /// Sender is a bot account (prevents bot-to-bot loops).
    SenderIsBot,
    /// No trigger condition held.
    NoTrigger,
    /// Triggered, but the sender replied too recently.
    CoolingDown,
}

/// Gate state: last-reply timestamps keyed by (chat id, sender id).
///
/// Process-lifetime only; lost on restart. The composite key keeps the
/// cooldown scoped per chat, so the same user in two groups is limited
/// independently.
#[derive(Debug, Default)]
pub struct TriggerGate {
    last_reply: HashMap<(String, String), i64>,
}

impl TriggerGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the trigger rules and the cooldown for one message.
    ///
    /// `now` is a Unix timestamp supplied by the caller. On `Reply` the
    /// sender's timestamp is recorded before the caller sends anything, so a
    /// duplicate trigger arriving in the same instant cools down instead of
    /// double-replying.
    pub fn check(
        &mut self,
        msg: &IncomingMessage,
        autoreply: bool,
        bot: &BotIdentity,
        now: i64,
    ) -> TriggerDecision {
        if msg.sender_is_bot {
            return TriggerDecision::SenderIsBot;
        }

        let replied_to_bot = msg.reply_to_sender_id.as_deref() == Some(bot.id.as_str());
        let mentioned = mentions(&msg.text, &bot.username);

        if !(autoreply || replied_to_bot || mentioned) {
            return TriggerDecision::NoTrigger;
        }

        let key = (msg.chat_id.clone(), msg.sender_id.clone());
        let last = self.last_reply.get(&key).copied().unwrap_or(0);
        if now - last < COOLDOWN_SECS {
            return TriggerDecision::CoolingDown;
        }

        self.last_reply.insert(key, now);
        // Expired entries can never suppress anything again; drop them so the
        // map tracks active senders rather than everyone ever seen.
        self.last_reply.retain(|_, ts| now - *ts < COOLDOWN_SECS);
        TriggerDecision::Reply
    }
}

/// Case-insensitive substring check for the bot's handle.
///
/// An empty handle never matches (a channel may not have resolved one).
pub fn mentions(text: &str, handle: &str) -> bool {
    if handle.is_empty() {
        return false;
    }
    text.to_lowercase().contains(&handle.to_lowercase())
}
