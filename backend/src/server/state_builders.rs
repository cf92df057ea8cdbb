//! Wiring of record-store adapters into the HTTP state.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use transfer_ledger::domain::ports::{TransferRepository, UserRepository};
use transfer_ledger::domain::{TransferLedgerService, UserDirectoryService};
use transfer_ledger::inbound::http::state::HttpState;
use transfer_ledger::outbound::memory::MemoryStore;
use transfer_ledger::outbound::persistence::{DieselTransferRepository, DieselUserRepository};

use super::ServerConfig;

fn build_services<U, T>(users: Arc<U>, transfers: Arc<T>, clock: Arc<dyn Clock>) -> HttpState
where
    U: UserRepository + 'static,
    T: TransferRepository + 'static,
{
    let directory = UserDirectoryService::new(users.clone());
    let ledger = TransferLedgerService::new(users, transfers, clock);
    HttpState::new(Arc::new(directory), Arc::new(ledger))
}

/// Select PostgreSQL repositories when a pool is configured, otherwise a
/// fresh in-memory store shared by both services.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL record store");
            build_services(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselTransferRepository::new(pool.clone())),
                config.clock.clone(),
            )
        }
        None => {
            info!("no database configured; records are kept in memory");
            let store = Arc::new(MemoryStore::new());
            build_services(store.clone(), store, config.clock.clone())
        }
    }
}
