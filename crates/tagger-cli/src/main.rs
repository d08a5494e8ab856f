use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use application::TagsRepository;
use domain::ConnectivityProbe;
use infrastructure::config::AppConfig;
use infrastructure::{HttpTagStore, SqliteTagStore, TcpProbe};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Override the remote tags endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Skip the connectivity probe and load from the local store
    #[arg(long)]
    offline: bool,

    /// Mark the cache dirty before fetching
    #[arg(long)]
    refresh: bool,
}

/// Probe used with --offline: always reports no connectivity, which
/// routes the repository to the local store.
struct ForcedOffline;

#[async_trait]
impl ConnectivityProbe for ForcedOffline {
    async fn is_connected(&self) -> bool {
        false
    }
}

/// SQLite wants the database file's parent directory to exist up front.
fn ensure_sqlite_parent(database_url: &str) -> Result<()> {
    if let Some(rest) = database_url.strip_prefix("sqlite://") {
        let path = rest.split('?').next().unwrap_or(rest);
        if path != ":memory:" {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }
    }
    Ok(())
}

async fn run() -> Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,application=debug,infrastructure=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load(&args.config_dir)?;
    if let Some(endpoint) = args.endpoint {
        config.remote.endpoint = endpoint;
    }

    info!("🏷️  Tagger starting");
    info!(endpoint = %config.remote.endpoint, database = %config.local.database_url, "configuration loaded");

    ensure_sqlite_parent(&config.local.database_url)?;

    let remote = Arc::new(HttpTagStore::with_timeouts(
        config.remote.endpoint.as_str(),
        Duration::from_secs(config.remote.connect_timeout_secs),
        Duration::from_secs(config.remote.request_timeout_secs),
    )?);
    let local = Arc::new(SqliteTagStore::new(&config.local.database_url).await?);
    let probe: Arc<dyn ConnectivityProbe> = if args.offline {
        Arc::new(ForcedOffline)
    } else {
        Arc::new(TcpProbe::new(
            &config.probe.host,
            config.probe.port,
            Duration::from_millis(config.probe.timeout_ms),
        ))
    };

    let repository = TagsRepository::new(remote, local, probe);

    if args.refresh {
        repository.refresh_tags().await;
    }

    match repository.get_tags().await {
        Ok(mut tags) => {
            tags.sort();
            info!(count = tags.len(), "tags loaded");
            for tag in &tags {
                println!("{:>6}  {:<24} #{:08X}", tag.id, tag.label, tag.color_value());
            }
        }
        Err(e) => {
            error!(error = %e, "no tags available");
        }
    }

    repository.shutdown().await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}
