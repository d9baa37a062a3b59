//! End-to-end flow tests: commands, trigger gating, cooldown, and reply
//! selection wired through the message handler, with a real store on disk.

use rand::SeedableRng as _;
use rand::rngs::StdRng;

use persona_bot::admin::AdminPolicy;
use persona_bot::channels::{BotIdentity, IncomingMessage};
use persona_bot::engine::MessageHandler;
use persona_bot::engine::reply::{QUESTION_RESPONSES, STATEMENT_RESPONSES};
use persona_bot::engine::commands::REFUSAL_TEXT;
use persona_bot::store::GroupStore;

const CHAT: &str = "-1001234";
const ADMIN: &str = "42";
const USER: &str = "111";

fn new_handler(dir: &tempfile::TempDir) -> MessageHandler<StdRng> {
    let store = GroupStore::load(dir.path().join("bot_data.json"));
    let identity = BotIdentity {
        id: "999".into(),
        username: "miss_bot".into(),
    };
    MessageHandler::new(
        store,
        AdminPolicy::new([ADMIN]),
        identity,
        StdRng::seed_from_u64(99),
    )
}

fn from_user(sender: &str, text: &str) -> IncomingMessage {
    IncomingMessage::new("telegram", CHAT, sender, text)
}

#[test]
fn autoreply_off_means_silence_without_mention_or_reply() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = new_handler(&dir);

    let out = h.handle(&from_user(USER, "क्या हाल है दोस्तों"), 100);
    assert!(out.is_none());
}

#[test]
fn autoreply_on_produces_exactly_one_reply_per_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = new_handler(&dir);

    let ack = h.handle(&from_user(ADMIN, "/autoreply on"), 100).unwrap();
    assert_eq!(ack, "Auto-reply set to true.");

    let out = h.handle(&from_user(USER, "बस ऐसे ही"), 110);
    assert!(out.is_some());
}

#[test]
fn cooldown_suppresses_rapid_second_trigger() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = new_handler(&dir);
    h.handle(&from_user(ADMIN, "/autoreply on"), 100);

    assert!(h.handle(&from_user(USER, "पहला"), 110).is_some());
    // Less than 6 seconds later, same sender, same chat: suppressed
    assert!(h.handle(&from_user(USER, "दूसरा"), 114).is_none());
    // After the window it replies again
    assert!(h.handle(&from_user(USER, "तीसरा"), 116).is_some());
}

#[test]
fn question_example_routes_through_question_pool() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = new_handler(&dir);

    let out = h
        .handle(&from_user(USER, "@miss_bot यह कैसे काम करता है?"), 100)
        .expect("mention triggers a reply");
    assert!(
        QUESTION_RESPONSES.iter().any(|q| out.starts_with(q)),
        "got: {out}"
    );
    assert!(out.ends_with("— Miss"), "got: {out}");
}

#[test]
fn reply_to_bot_triggers_statement_reply() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = new_handler(&dir);

    let msg = from_user(USER, "ठीक है").with_reply_to_sender("999");
    let out = h.handle(&msg, 100).expect("reply-to-bot triggers");
    assert!(
        STATEMENT_RESPONSES.iter().any(|s| out.starts_with(s)),
        "got: {out}"
    );
}

#[test]
fn long_text_quotes_first_eight_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = new_handler(&dir);
    h.handle(&from_user(ADMIN, "/autoreply on"), 100);

    let out = h
        .handle(
            &from_user(USER, "आज हम सब लोग बाहर घूमने गए और बहुत मज़ा आया"),
            110,
        )
        .unwrap();
    assert!(
        out.contains("तुमने कहा: \"आज हम सब लोग बाहर घूमने गए और...\""),
        "got: {out}"
    );
}

#[test]
fn setpersona_refused_for_non_admin_and_applied_for_admin() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = new_handler(&dir);

    let refusal = h.handle(&from_user(USER, "/setpersona Luna"), 100).unwrap();
    assert_eq!(refusal, REFUSAL_TEXT);

    let status = h.handle(&from_user(USER, "/status"), 101).unwrap();
    assert!(status.contains("Persona: *Miss*"));

    let ack = h.handle(&from_user(ADMIN, "/setpersona Luna"), 102).unwrap();
    assert_eq!(ack, "Persona updated to *Luna*");

    // Subsequent replies sign as Luna
    let out = h
        .handle(&from_user(USER, "@miss_bot नमस्ते जी"), 110)
        .unwrap();
    assert!(out.ends_with("— Luna"), "got: {out}");
}

#[test]
fn bot_senders_never_get_replies() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = new_handler(&dir);
    h.handle(&from_user(ADMIN, "/autoreply on"), 100);

    let msg = from_user("777", "@miss_bot hello!").with_sender_is_bot(true);
    assert!(h.handle(&msg, 110).is_none());
}

#[test]
fn group_settings_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut h = new_handler(&dir);
        h.handle(&from_user(ADMIN, "/autoreply on"), 100);
        h.handle(&from_user(ADMIN, "/setpersona Luna"), 101);
    }

    // Fresh handler over the same data file
    let mut h = new_handler(&dir);
    let status = h.handle(&from_user(USER, "/status"), 200).unwrap();
    assert!(status.contains("Auto-reply: *true*"));
    assert!(status.contains("Persona: *Luna*"));

    // Cooldown state, by contrast, did not survive: first trigger replies
    assert!(h.handle(&from_user(USER, "कुछ भी"), 201).is_some());
}
