use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use youtube_analytics::auth::{hash_password, UserDirectory};
use youtube_analytics::bundle::{write_bundle, DEFAULT_BUNDLE_NAME};
use youtube_analytics::config::Config;
use youtube_analytics::exchange::Binance;
use youtube_analytics::web;

#[derive(Parser, Debug)]
#[command(name = "youtube-analytics", version)]
#[command(about = "Password-protected YouTube channel dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the dashboard web server (default)
    Serve,
    /// Write the zip with the source listing (main.rs) and manifest (Cargo.toml)
    Bundle {
        #[arg(short, long, default_value = DEFAULT_BUNDLE_NAME)]
        output: PathBuf,
    },
    /// Print the public 24h ticker for a trading pair
    Ticker {
        /// Unified symbol, e.g. BTC/USDT (defaults to EXCHANGE_SYMBOL)
        #[arg(short, long)]
        symbol: Option<String>,
        /// Public REST base URL (defaults to EXCHANGE_PUBLIC_URL)
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Print an Argon2 hash for the users file
    HashPassword { password: String },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing()?;

    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Bundle { output } => {
            write_bundle(&output)?;
            println!("Arquivo '{}' criado com sucesso!", output.display());
            Ok(())
        }
        Command::Ticker { symbol, api_url } => {
            let symbol = symbol.unwrap_or_else(|| config.exchange_symbol.clone());
            let api_url = api_url.unwrap_or_else(|| config.exchange_public_url.clone());
            let http = config.http_client().context("Failed to build HTTP client")?;

            println!("youtube-analytics {}", env!("CARGO_PKG_VERSION"));
            let ticker = Binance::new(http, &api_url)
                .fetch_ticker(&symbol)
                .await
                .with_context(|| format!("Failed to fetch ticker for {symbol}"))?;
            println!("{}", serde_json::to_string_pretty(&ticker)?);
            Ok(())
        }
        Command::HashPassword { password } => {
            println!("{}", hash_password(&password)?);
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting youtube-analytics");

    config.validate().context("Invalid configuration")?;

    let users = UserDirectory::load(&config.users_file).await?;
    if users.is_empty() {
        anyhow::bail!(
            "No users configured in {}; add one with `hash-password`",
            config.users_file.display()
        );
    }

    info!(
        users = users.len(),
        recent_videos = config.recent_video_count,
        "Configuration loaded"
    );

    web::serve(config, users).await
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,youtube_analytics=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}
