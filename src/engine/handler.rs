//! Per-message orchestration: commands first, then gate, then reply.

use rand::Rng;

use crate::admin::AdminPolicy;
use crate::channels::{BotIdentity, IncomingMessage};
use crate::engine::trigger::{TriggerDecision, TriggerGate};
use crate::engine::{commands, reply};
use crate::store::GroupStore;

/// The bot's decision core. Owns the group store, the admin policy, the
/// trigger gate and the RNG; the channel layer feeds it messages and sends
/// whatever text it returns.
#[derive(Debug)]
pub struct MessageHandler<R: Rng> {
    store: GroupStore,
    admins: AdminPolicy,
    identity: BotIdentity,
    gate: TriggerGate,
    rng: R,
}

impl<R: Rng> MessageHandler<R> {
    pub fn new(store: GroupStore, admins: AdminPolicy, identity: BotIdentity, rng: R) -> Self {
        Self {
            store,
            admins,
            identity,
            gate: TriggerGate::new(),
            rng,
        }
    }

    /// Handle one inbound message; `now` is a Unix timestamp.
    ///
    /// Returns the reply text to send, or `None` when the bot stays silent.
    pub fn handle(&mut self, msg: &IncomingMessage, now: i64) -> Option<String> {
        if let Some(cmd) = commands::parse(&msg.text, &self.identity.username) {
            tracing::info!(chat = %msg.chat_id, sender = %msg.sender_id, ?cmd, "command");
            return Some(commands::execute(
                &cmd,
                &msg.chat_id,
                &msg.sender_id,
                &mut self.store,
                &self.admins,
            ));
        }

        let conf = self.store.get_or_create_default(&msg.chat_id);
        let autoreply = conf.autoreply;
        let persona = conf.persona.clone();

        match self.gate.check(msg, autoreply, &self.identity, now) {
            TriggerDecision::Reply => {
                Some(reply::make_reply(&mut self.rng, &msg.text, &persona))
            }
            TriggerDecision::CoolingDown => {
                tracing::debug!(chat = %msg.chat_id, sender = %msg.sender_id, "cooldown, suppressing reply");
                None
            }
            TriggerDecision::SenderIsBot | TriggerDecision::NoTrigger => None,
        }
    }

    pub fn store(&self) -> &GroupStore {
        &self.store
    }
}
