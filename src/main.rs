//! Binary entrypoint: config, tracing, backend selection, serve.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use coursebook::config::ServerConfig;
use coursebook::server::{AppState, serve};
use coursebook::storage::in_memory_stores;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = load_config()?;
    let state = app_state(&config).await?;

    serve(&config, state).await
}

fn load_config() -> Result<ServerConfig> {
    let config = match std::env::var("COURSEBOOK_CONFIG") {
        Ok(path) => ServerConfig::from_yaml_file(&path)?,
        Err(_) => ServerConfig::default_config(),
    };
    Ok(config.from_env())
}

async fn app_state(config: &ServerConfig) -> Result<AppState> {
    #[cfg(feature = "postgres")]
    if let Some(database_url) = config.database_url.as_deref() {
        use coursebook::storage::{PostgresCourseStore, PostgresUserStore};

        let pool = coursebook::storage::postgres::connect(database_url).await?;
        coursebook::storage::postgres::run_migrations(&pool).await?;
        tracing::info!("using postgresql storage backend");
        return Ok(AppState::new(
            Arc::new(PostgresUserStore::new(pool.clone())),
            Arc::new(PostgresCourseStore::new(pool)),
        ));
    }

    #[cfg(not(feature = "postgres"))]
    if config.database_url.is_some() {
        tracing::warn!("database_url set but the postgres feature is not enabled");
    }

    tracing::info!("using in-memory storage backend");
    let (users, courses) = in_memory_stores();
    Ok(AppState::new(Arc::new(users), Arc::new(courses)))
}
