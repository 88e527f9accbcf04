//! booklog CLI entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booklog::cli::{Cli, Commands};
use booklog::commands::execute;
use booklog::config::Config;
use booklog::storage::{OfflineStore, RestEntryStore};
use booklog::{Library, SyncedEntryStore};
use booklog_core::cache::Cache;
use booklog_core::storage::RemoteEntryStore;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "booklog=warn" } else { "booklog=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    cli.apply_to(&mut config);

    let remote = build_remote(&config)?;
    let cache = build_cache(&config).await?;
    let mut library = Library::new(SyncedEntryStore::new(remote, cache));

    if !cli.skip_migration && !matches!(cli.command, Commands::Migrate) {
        library.migrate().await;
    }

    if let Some(text) = execute(&mut library, cli.command, cli.format, cli.quiet).await? {
        println!("{text}");
    }

    Ok(())
}

fn build_remote(config: &Config) -> Result<Arc<dyn RemoteEntryStore>> {
    match &config.remote_url {
        Some(url) => {
            let store =
                RestEntryStore::new(url, &config.table, &config.api_key, config.request_timeout())
                    .with_context(|| format!("invalid remote configuration for {url}"))?;
            tracing::debug!(url = %store.table_url(), "Using remote table");
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!("No remote configured, running local-only");
            Ok(Arc::new(OfflineStore))
        }
    }
}

#[cfg(not(feature = "sqlite"))]
async fn build_cache(config: &Config) -> Result<Arc<dyn Cache>> {
    tracing::debug!(dir = %config.cache_dir.display(), "Using file cache");
    Ok(Arc::new(booklog::cache::FileCache::new(&config.cache_dir)))
}

#[cfg(feature = "sqlite")]
async fn build_cache(config: &Config) -> Result<Arc<dyn Cache>> {
    tracing::debug!(path = %config.sqlite_path, "Using SQLite cache");
    let cache = booklog::cache::SqliteCache::new(&config.sqlite_path)
        .await
        .with_context(|| format!("failed to open cache database {}", config.sqlite_path))?;
    Ok(Arc::new(cache))
}
