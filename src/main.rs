use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use faceit_relay::api::state::AppState;
use faceit_relay::calendar::CoverageIndex;
use faceit_relay::config::AppConfig;
use faceit_relay::faceit::FaceitClient;
use faceit_relay::flights::VolantaClient;
use faceit_relay::usage::UsageLog;

#[derive(Parser)]
#[command(name = "faceit-relay")]
#[command(about = "Faceit aggregation backend for chat bots and calendars")]
#[command(version)]
struct Cli {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port number (overrides the PORT environment variable)
    #[arg(long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting faceit-relay v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Environment: {}", config.environment);

    let coverage = match &config.coverage_file {
        Some(path) => {
            let index = CoverageIndex::load(path)
                .with_context(|| format!("loading coverage file {}", path.display()))?;
            tracing::info!("Loaded {} coverage entries", index.len());
            index
        }
        None => CoverageIndex::empty(),
    };

    let faceit = FaceitClient::new(&config.faceit_api_key)?;
    let flights = VolantaClient::new()?;

    let state = AppState {
        player_log: Arc::new(UsageLog::new(&config.usage_dir, "players.json")),
        user_log: Arc::new(UsageLog::new(&config.usage_dir, "users.json")),
        bot_log: Arc::new(UsageLog::new(&config.usage_dir, "bots.json")),
        faceit: Arc::new(faceit),
        flights: Arc::new(flights),
        coverage: Arc::new(coverage),
        config: Arc::new(config),
    };

    let port = cli.port.unwrap_or(state.config.port);
    let app = faceit_relay::api::build_router(state);
    let addr = format!("{}:{}", cli.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
