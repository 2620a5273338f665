//! robodash
//!
//! Operator console for robot telemetry.
//!
//! # Configuration
//!
//! Read from `--config`, or the first of `$CONFIG/robodash/config.toml`,
//! `/etc/robodash/config.toml`, `./robodash.toml`. Environment variables
//! override the file:
//! - `ROBODASH_API_BASE`: Backend REST base (default: http://localhost:8080/api)
//! - `ROBODASH_FEED_URL`: Feed WebSocket URL (default: derived from the API base)
//! - `ROBODASH_HOST` / `ROBODASH_PORT`: Console bind address (default: 127.0.0.1:8084)
//! - `ROBODASH_RECONNECT_MAX_ATTEMPTS`: Feed reconnect cap, 0 for unlimited
//! - `ROBODASH_LOG_LEVEL` / `ROBODASH_LOG_FORMAT`: Logging (info, pretty|json)
//! - `RUST_LOG`: Full filter directive, wins over the level above

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use robodash::backend::{Backend, HttpBackend};
use robodash::config::{Config, LoggingConfig};
use robodash::console::{self, ConsoleSettings, ConsoleState};
use robodash::dashboard::Dashboard;
use robodash::feed::FeedClient;
use robodash::refresh;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "robodash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Operator console for robot telemetry")]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the console (default)
    Serve,

    /// List robots once and exit
    Robots,

    /// Send one command to a robot
    Send {
        /// Robot id
        robot_id: String,
        /// Command text
        command: String,
    },

    /// Print a default config file
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            init_logging(&config.logging)?;
            run_console(config).await
        }
        Commands::Robots => list_robots(&config).await,
        Commands::Send { robot_id, command } => send_command(&config, &robot_id, &command).await,
        Commands::Config => {
            print!("{}", Config::default_toml()?);
            Ok(())
        }
    }
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("robodash={},tower_http=info", config.level))
    });
    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }
    Ok(())
}

async fn run_console(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting robodash v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(api_base = %config.backend.api_base, "Backend configured");

    let backend = Arc::new(HttpBackend::new(&config.backend).context("building backend client")?);
    let dashboard = Arc::new(Dashboard::init(backend));

    let feed_url = config.backend.feed_url();
    tracing::info!(url = %feed_url, "Feed configured");
    let feed = FeedClient::new(feed_url, config.feed.reconnect.clone())
        .spawn(Arc::clone(&dashboard));

    let timers = refresh::spawn(Arc::clone(&dashboard), &config.refresh);

    let loader = {
        let dashboard = Arc::clone(&dashboard);
        tokio::spawn(async move {
            if let Err(e) = dashboard.load_robots().await {
                tracing::warn!(error = %e, "Initial robot list unavailable");
            }
        })
    };

    let state = ConsoleState::new(Arc::clone(&dashboard), ConsoleSettings::from_config(&config));
    let served = console::serve(state, &config.console).await;

    tracing::info!("Shutting down...");
    dashboard.shutdown();
    loader.abort();
    if let Err(e) = feed.await {
        tracing::warn!(error = %e, "Feed task ended abnormally");
    }
    timers.join().await;

    served?;
    tracing::info!("robodash shutdown complete");
    Ok(())
}

async fn list_robots(config: &Config) -> anyhow::Result<()> {
    let backend = HttpBackend::new(&config.backend)?;
    let response = backend
        .list_robots()
        .await
        .with_context(|| format!("fetching robot list from {}", backend.api_base()))?;

    if !response.success {
        bail!(
            "backend rejected robot list: {}",
            response.message.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    println!("{:<16} {:<24} {}", "ID", "NAME", "STATUS");
    for robot in &response.data {
        let status = if robot.online { "online" } else { "offline" };
        println!("{:<16} {:<24} {}", robot.id, robot.name, status);
    }
    println!("{} robot(s)", response.data.len());
    Ok(())
}

async fn send_command(config: &Config, robot_id: &str, command: &str) -> anyhow::Result<()> {
    let backend = HttpBackend::new(&config.backend)?;
    let response = backend
        .send_command(robot_id, command)
        .await
        .context("Command failed")?;

    if response.success {
        println!("Command sent: {}", command);
        Ok(())
    } else {
        bail!(
            "Command failed: {}",
            response.message.unwrap_or_else(|| "unknown error".to_string())
        )
    }
}
