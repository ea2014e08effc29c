//! `stockquest` command-line entry point.

mod config;
mod source;

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::time::MissedTickBehavior;

use stockquest_events::InMemoryEventBus;
use stockquest_inventory::{
    StatusFilter, StockEnvelope, StockQuery, StockStore, StoreConfig, SystemClock,
};

use crate::config::Config;
use crate::source::FixtureDirSource;

type Store = StockStore<FixtureDirSource, SystemClock, InMemoryEventBus<StockEnvelope>>;

#[derive(Debug, Parser)]
#[command(name = "stockquest", about = "Warehouse stock levels, stats and alerts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Print aggregate stats as JSON (default).
    Summary,
    /// Print stock items as JSON, optionally filtered by status.
    List {
        /// all | critical | low | healthy
        #[arg(default_value = "all")]
        status: StatusFilter,
    },
    /// Reload on the refresh period until Ctrl-C.
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Bring logging up before reading the rest of the settings so that
    // fallbacks to defaults are reported.
    let log_format = std::env::var(config::LOG_FORMAT_VAR)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();
    stockquest_observability::init(log_format);
    let config = Config::from_env();
    tracing::debug!(
        fixtures_dir = %config.fixtures_dir.display(),
        cache_ttl_secs = config.cache_ttl.as_secs(),
        refresh_secs = config.refresh_every.as_secs(),
        log_format = ?config.log_format,
        "configuration loaded"
    );

    let source = FixtureDirSource::new(&config.fixtures_dir);
    let bus: InMemoryEventBus<StockEnvelope> = InMemoryEventBus::new();
    let mut store: Store = StockStore::new(
        source,
        SystemClock,
        bus,
        StoreConfig {
            freshness: config.cache_ttl,
        },
    );

    store.reload().with_context(|| {
        format!(
            "failed to load warehouse data from {}",
            config.fixtures_dir.display()
        )
    })?;

    for sku in store.orphaned_skus() {
        tracing::warn!(%sku, "bin stock for SKU missing from catalog is not counted");
    }

    match cli.command.unwrap_or(Command::Summary) {
        Command::Summary => print_summary(&store)?,
        Command::List { status } => print_items(&store, status)?,
        Command::Watch => watch(&mut store, config.refresh_every).await,
    }

    Ok(())
}

fn print_summary(store: &Store) -> anyhow::Result<()> {
    let summary = serde_json::json!({
        "stats": store.stats(),
        "orphanedSkus": store.orphaned_skus(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("failed to render summary")?
    );
    Ok(())
}

fn print_items(store: &Store, status: StatusFilter) -> anyhow::Result<()> {
    let items = store.query(&StockQuery::default().with_filter(status));
    println!(
        "{}",
        serde_json::to_string_pretty(&items).context("failed to render items")?
    );
    Ok(())
}

async fn watch(store: &mut Store, every: Duration) {
    tracing::info!(every_secs = every.as_secs(), "watching warehouse stock");

    let mut refresh = tokio::time::interval(every);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received; stopping watch");
                break;
            }
            _ = refresh.tick() => {
                match store.reload() {
                    Ok(outcome) => {
                        let stats = store.stats();
                        tracing::info!(
                            cache = ?outcome.status,
                            items = outcome.items.len(),
                            total_items = stats.total_items,
                            total_value = %stats.total_value,
                            low = stats.low_stock_count,
                            critical = stats.critical_count,
                            perfect_audits = stats.perfect_audits,
                            "stock refreshed"
                        );
                    }
                    Err(err) => tracing::warn!("stock reload failed: {err}"),
                }
            }
        }
    }
}
