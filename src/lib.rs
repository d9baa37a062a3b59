//! Persona bot — canned-reply group-chat bot.

pub mod admin;
pub mod channels;
pub mod config;
pub mod engine;
pub mod error;
pub mod store;
