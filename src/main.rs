use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

mod domain;
mod application;
mod infrastructure;

use application::errors::BotError;
use application::messaging::MessageDispatcher;
use application::services::{MessageFilter, TranslationService};
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::adapters::discord::DiscordAdapter;
use infrastructure::config::Config;
use infrastructure::language::LibreTranslateClient;

#[derive(Parser)]
#[command(name = "lingo-bot")]
#[command(about = "Auto-translates chat messages in watched categories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Discord bot token (overrides config and DISCORD_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and translate
    Run,
    /// Translate stdin lines (dev mode)
    Console,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => load_config(&cli.config, cli.token).and_then(run_bot),
        Commands::Console => load_config(&cli.config, cli.token).and_then(run_console),
        Commands::Version => {
            println!("lingo-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// File (when present) or defaults, then environment, then CLI token
fn load_config(config_path: &str, token_override: Option<String>) -> Result<Config, BotError> {
    let mut config = Config::resolve(config_path)?;

    if let Some(token) = token_override {
        config.discord.token = Some(token);
    }

    config.validate()?;
    Ok(config)
}

fn build_dispatcher(config: &Config) -> MessageDispatcher<LibreTranslateClient> {
    let client = LibreTranslateClient::new(config.service.clone());
    let translator = TranslationService::new(
        client,
        config.translation.strategy,
        config.translation.target_language.clone(),
    );

    tracing::info!(
        "Translating into {} via {} (strategy: {})",
        config.translation.target_language,
        config.service.base_url,
        config.translation.strategy.as_str()
    );

    MessageDispatcher::new(MessageFilter::new(config.watched_categories()), translator)
}

fn runtime() -> Result<tokio::runtime::Runtime, BotError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))
}

fn run_bot(config: Config) -> Result<(), BotError> {
    let token = config.require_token()?.to_string();
    tracing::info!("Starting {}", config.bot.name);

    let dispatcher = Arc::new(build_dispatcher(&config));
    runtime()?.block_on(DiscordAdapter::new(token, dispatcher).start())
}

fn run_console(config: Config) -> Result<(), BotError> {
    let dispatcher = build_dispatcher(&config);
    let category = config
        .watched_categories()
        .first()
        .ok_or_else(|| BotError::Internal("no watched category".to_string()))?;

    runtime()?.block_on(async {
        ConsoleAdapter::new(category).run(&dispatcher).await
    })
}

fn init_config() -> Result<(), BotError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
