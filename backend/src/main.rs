//! Service entry-point: loads settings, prepares the record store and serves
//! the REST API with health probes and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use transfer_ledger::inbound::http::health::HealthState;
use transfer_ledger::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use transfer_ledger::settings::AppSettings;

async fn connect(settings: &AppSettings, database_url: &str) -> std::io::Result<DbPool> {
    if settings.run_migrations {
        let applied = run_migrations(database_url)
            .await
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
        info!(applied, "database migrations applied");
    }

    let mut pool_config = PoolConfig::new(database_url);
    if let Some(max_size) = settings.pool_max_size {
        pool_config = pool_config.with_max_size(max_size);
    }
    DbPool::new(pool_config)
        .await
        .map_err(|e| std::io::Error::other(format!("database pool unavailable: {e}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("invalid configuration: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(database_url) = settings.database_url.as_deref() {
        config = config.with_db_pool(connect(&settings, database_url).await?);
    } else if settings.run_migrations {
        warn!("run_migrations is set but no database_url is configured; ignoring");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "transfer ledger listening");
    server.await
}
