//! Notes Bot for Telegram
//!
//! Receives chat commands, executes them against the notes REST API and
//! replies with the result.

use anyhow::Result;
use clap::Parser;
use teloxide::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notes_bot::config::Config;
use notes_bot::console::{ConsoleReplier, ConsoleSource};
use notes_bot::env::{self, SystemEnv};
use notes_bot::handlers::{self, TelegramSource};
use notes_bot::health::{self, AppState};
use notes_bot::outbound::TelegramReplier;
use notes_bot::{ChatAdapter, CommandDispatcher};
use notes_client::{HttpNoteClient, NotesApiConfig};

/// Notes Bot CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/notes-bot.toml")]
    config: String,

    /// Telegram bot token (overrides config file)
    #[arg(long, env = "TELEGRAM_BOT_TOKEN")]
    bot_token: Option<String>,

    /// Notes API collection URL (overrides config file)
    #[arg(long, env = "NOTES_API_URL")]
    api_url: Option<String>,

    /// Health check server port (0 disables it)
    #[arg(long, env = "HEALTH_CHECK_PORT", default_value = "3000")]
    health_port: u16,

    /// Read commands from stdin and print replies instead of using Telegram
    #[arg(long)]
    console: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before tracing and clap so RUST_LOG and `env =` args see `.env` values
    let dotenv_path = env::load_dotenv();

    // Initialize tracing; stdout is reserved for console replies
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_bot=debug,notes_client=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Notes Bot");
    if let Some(path) = &dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = if std::path::Path::new(&args.config).exists() {
        info!("Loading config from file: {}", args.config);
        Config::from_file(&args.config)?
    } else {
        info!("Config file not found, using environment variables");
        Config::from_env(&SystemEnv)
    };

    // Override with CLI arguments
    if let Some(bot_token) = args.bot_token {
        config.telegram.bot_token = bot_token;
    }
    if let Some(api_url) = args.api_url {
        config.notes_api = NotesApiConfig::new(api_url);
    }

    info!("Notes API: {}", config.notes_api.collection_url());

    let store = HttpNoteClient::new(&config.notes_api);

    if args.console {
        let health_state = AppState::new(None);
        health_state.set_connected(true);
        spawn_health_server(health_state.clone(), args.health_port);

        let adapter = ChatAdapter::new(CommandDispatcher::new(store), health_state);
        info!("Reading commands from stdin");
        adapter.run(ConsoleSource::new(), &ConsoleReplier).await;
        return Ok(());
    }

    config.validate_for_telegram()?;

    // Create Telegram bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram.bot_token);

    // Verify bot token
    let bot_username = match bot.get_me().await {
        Ok(me) => {
            let username = me.username().to_string();
            info!("Bot authenticated as: @{}", username);
            Some(username)
        }
        Err(e) => {
            error!("Failed to authenticate bot: {}", e);
            return Err(e.into());
        }
    };

    if config.telegram.register_commands {
        handlers::register_commands(&bot).await;
    }

    let health_state = AppState::new(bot_username);
    spawn_health_server(health_state.clone(), args.health_port);

    let (source, polling) = TelegramSource::polling(bot.clone(), config.telegram.limits.inbound_buffer);
    let replier = TelegramReplier::new(bot, config.telegram.limits.text_chunk_limit);
    let adapter = ChatAdapter::new(CommandDispatcher::new(store), health_state.clone());

    health_state.set_connected(true);
    info!("Bot initialized, starting command loop...");

    tokio::join!(polling, adapter.run(source, &replier));

    health_state.set_connected(false);
    info!("Notes bot stopped");
    Ok(())
}

fn spawn_health_server(state: AppState, port: u16) {
    if port == 0 {
        info!("Health check server disabled");
        return;
    }
    tokio::spawn(async move {
        if let Err(e) = health::serve(state, port).await {
            error!("Health check server error: {}", e);
        }
    });
}
