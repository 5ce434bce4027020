mod config;
mod error;
mod redis_store;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use shared::{Category, CategoryCollection, Collection, MemoryCollection, NewCategory, Task};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, StorageBackend};
use crate::redis_store::RedisCollection;
use crate::routes::AppState;

const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("Work", "#3b82f6"),
    ("Personal", "#10b981"),
    ("Shopping", "#f59e0b"),
    ("Health", "#ef4444"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("backend=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().context("Failed to read configuration")?;
    let state = build_state(&config)?;

    if config.seed_categories {
        seed_categories(state.categories.as_ref())
            .await
            .context("Failed to seed categories")?;
    }

    let app = routes::app(state, &config.static_dir);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    info!(
        addr = %config.bind,
        storage = config.storage.label(),
        static_dir = %config.static_dir.display(),
        "Server running"
    );
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let state = match &config.storage {
        StorageBackend::Redis { url } => {
            let client = Arc::new(
                redis::Client::open(url.as_str())
                    .with_context(|| format!("Invalid Redis URL {url}"))?,
            );
            AppState {
                tasks: Arc::new(RedisCollection::<Task>::new(Arc::clone(&client))),
                categories: Arc::new(RedisCollection::<Category>::new(client)),
            }
        }
        StorageBackend::Memory => AppState {
            tasks: Arc::new(MemoryCollection::<Task>::new()),
            categories: Arc::new(MemoryCollection::<Category>::new()),
        },
    };
    Ok(state)
}

/// Creates the default categories when the collection is empty.
async fn seed_categories(
    categories: &(dyn CategoryCollection + Send + Sync),
) -> anyhow::Result<()> {
    if !categories.get_all().await?.is_empty() {
        return Ok(());
    }
    for (name, color) in DEFAULT_CATEGORIES {
        categories
            .create(NewCategory {
                name: name.to_string(),
                color: color.to_string(),
            })
            .await?;
    }
    info!(count = DEFAULT_CATEGORIES.len(), "Seeded default categories");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeding_only_fills_an_empty_collection() {
        let categories = MemoryCollection::<Category>::new();
        seed_categories(&categories).await.unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());

        seed_categories(&categories).await.unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
    }
}
