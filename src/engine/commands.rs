//! Slash-command parsing and execution.
//!
//! Four commands: `/help`, `/status`, `/autoreply on|off`, `/setpersona
//! <name...>`. The last two are admin-gated. Unrecognized commands are not
//! claimed here — they fall through to the normal message path.

use crate::admin::AdminPolicy;
use crate::store::GroupStore;

pub const REFUSAL_TEXT: &str = "❌ सिर्फ admins ही यह कर सकते हैं।";
pub const AUTOREPLY_USAGE: &str = "Usage: /autoreply on|off";
pub const SETPERSONA_USAGE: &str = "Usage: /setpersona <name>";

pub const HELP_TEXT: &str = "मैं *Miss* — group assistant.\n\n\
Admin commands:\n\
/autoreply on|off — enable/disable auto replies in this group\n\
/setpersona <name> — change persona name\n\
/status — show settings\n\
/help — this message\n\n\
Triggers: mention the bot or reply to the bot.";

/// A parsed bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    /// Raw argument; interpretation (on/off) happens at execution.
    Autoreply(Option<String>),
    /// Remaining arguments joined with single spaces.
    SetPersona(Option<String>),
}

/// Parse `text` as a command addressed to this bot.
///
/// Returns `None` for non-commands, unknown commands, and commands addressed
/// to a different bot via the `/cmd@other_bot` group convention — all of
/// which are treated as ordinary messages.
pub fn parse(text: &str, bot_username: &str) -> Option<Command> {
    let mut parts = text.trim().split_whitespace();
    let head = parts.next()?;
    if !head.starts_with('/') {
        return None;
    }

    let name = &head[1..];
    let (name, target) = match name.split_once('@') {
        Some((n, t)) => (n, Some(t)),
        None => (name, None),
    };
    if let Some(target) = target
        && !target.eq_ignore_ascii_case(bot_username)
    {
        return None;
    }

    match name.to_ascii_lowercase().as_str() {
        "help" => Some(Command::Help),
        "status" => Some(Command::Status),
        "autoreply" => Some(Command::Autoreply(parts.next().map(str::to_string))),
        "setpersona" => {
            let rest = parts.collect::<Vec<_>>().join(" ");
            Some(Command::SetPersona((!rest.is_empty()).then_some(rest)))
        }
        _ => None,
    }
}

/// Execute a command for `sender_id` in `chat_id`, returning the reply text.
///
/// State changes go through the store (which persists them); unauthorized or
/// malformed invocations change nothing.
pub fn execute(
    cmd: &Command,
    chat_id: &str,
    sender_id: &str,
    store: &mut GroupStore,
    admins: &AdminPolicy,
) -> String {
    match cmd {
        Command::Help => HELP_TEXT.to_string(),

        Command::Status => {
            let conf = store.get_or_create_default(chat_id);
            format!(
                "Group id: `{chat_id}`\nAuto-reply: *{}*\nPersona: *{}*",
                conf.autoreply, conf.persona.name
            )
        }

        Command::Autoreply(arg) => {
            if !admins.is_admin(sender_id) {
                return REFUSAL_TEXT.to_string();
            }
            let Some(arg) = arg else {
                return AUTOREPLY_USAGE.to_string();
            };
            let enabled = matches!(arg.to_lowercase().as_str(), "on" | "1" | "true" | "enable");
            store.set_autoreply(chat_id, enabled);
            format!("Auto-reply set to {enabled}.")
        }

        Command::SetPersona(name) => {
            if !admins.is_admin(sender_id) {
                return REFUSAL_TEXT.to_string();
            }
            let Some(name) = name else {
                return SETPERSONA_USAGE.to_string();
            };
            store.set_persona_name(chat_id, name);
            format!("Persona updated to *{name}*")
        }
    }
}
