//! The reply decision core: trigger gating, reply selection, commands.

pub mod commands;
pub mod handler;
pub mod reply;
pub mod trigger;

pub use handler::MessageHandler;
pub use trigger::{COOLDOWN_SECS, TriggerDecision, TriggerGate};
