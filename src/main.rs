use futures::StreamExt as _;
use rand::SeedableRng as _;
use rand::rngs::StdRng;

use persona_bot::admin::AdminPolicy;
use persona_bot::channels::{Channel, CliChannel, OutgoingResponse, TelegramChannel};
use persona_bot::config::BotConfig;
use persona_bot::engine::MessageHandler;
use persona_bot::store::GroupStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = BotConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export BOT_TOKEN=123456:ABC-... (or PERSONA_BOT_CLI=1 for a local REPL)");
        std::process::exit(1);
    });

    eprintln!("🌸 Persona Bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Data file: {}", config.data_file.display());
    eprintln!(
        "   Admins: {}",
        if config.admin_ids.is_empty() {
            "none (admin commands disabled)".to_string()
        } else {
            config.admin_ids.join(", ")
        }
    );

    let store = GroupStore::load(&config.data_file);
    let admins = AdminPolicy::new(config.admin_ids.clone());

    let channel: Box<dyn Channel> = match config.bot_token {
        Some(token) if !config.use_cli => {
            Box::new(TelegramChannel::new(token, config.poll_timeout_secs))
        }
        _ => Box::new(CliChannel::new("miss")),
    };
    eprintln!("   Channel: {}\n", channel.name());

    channel.health_check().await?;
    let identity = channel.identity().await?;
    tracing::info!(
        bot_id = %identity.id,
        handle = %identity.username,
        "bot identity resolved"
    );

    let mut handler = MessageHandler::new(store, admins, identity, StdRng::from_entropy());

    let mut stream = channel.start().await?;
    while let Some(msg) = stream.next().await {
        let now = chrono::Utc::now().timestamp();
        if let Some(text) = handler.handle(&msg, now)
            && let Err(e) = channel.respond(&msg, OutgoingResponse::new(text)).await
        {
            // Best-effort send; the channel already retried once internally
            tracing::warn!(chat = %msg.chat_id, error = %e, "failed to send reply");
        }
    }

    channel.shutdown().await?;
    Ok(())
}
