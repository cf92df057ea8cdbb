//! In-process record store.
//!
//! Implements both repository ports over a single shared table set so that
//! removing a user cascades to its transfers exactly as the PostgreSQL schema
//! does. Used when no database URL is configured and throughout the HTTP
//! tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    TransferPersistenceError, TransferRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    NewTransfer, Transfer, TransferFilter, TransferId, User, UserId, UserProfile,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    transfers: BTreeMap<TransferId, Transfer>,
    last_user_id: i64,
    last_transfer_id: i64,
}

impl Tables {
    fn active_transfers(&self) -> impl Iterator<Item = &Transfer> {
        self.transfers.values().filter(|transfer| !transfer.is_deleted())
    }

    fn active_transfer_mut(&mut self, id: TransferId) -> Option<&mut Transfer> {
        self.transfers
            .get_mut(&id)
            .filter(|transfer| !transfer.is_deleted())
    }
}

/// Shared in-memory store. Clones see the same data.
///
/// Identifiers start at 1 and are never reused, matching `BIGSERIAL`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, profile: &UserProfile) -> Result<User, UserPersistenceError> {
        let mut tables = self.tables.write().await;
        tables.last_user_id += 1;
        let id = UserId::new(tables.last_user_id);
        let user = User::new(id, profile.clone());
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn update(
        &self,
        id: UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut tables = self.tables.write().await;
        let Some(slot) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        *slot = User::new(id, profile.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.transfers.retain(|_, transfer| transfer.user_id() != id);
        Ok(true)
    }
}

#[async_trait]
impl TransferRepository for MemoryStore {
    async fn create(&self, transfer: &NewTransfer) -> Result<Transfer, TransferPersistenceError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&transfer.user_id) {
            return Err(TransferPersistenceError::query(
                "referenced user does not exist",
            ));
        }
        tables.last_transfer_id += 1;
        let id = TransferId::new(tables.last_transfer_id);
        let stored = Transfer::new(id, transfer.clone(), false);
        tables.transfers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_active_by_id(
        &self,
        id: TransferId,
    ) -> Result<Option<Transfer>, TransferPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .transfers
            .get(&id)
            .filter(|transfer| !transfer.is_deleted())
            .cloned())
    }

    async fn list_active(&self) -> Result<Vec<Transfer>, TransferPersistenceError> {
        Ok(self.tables.read().await.active_transfers().cloned().collect())
    }

    async fn filter_active(
        &self,
        filter: &TransferFilter,
    ) -> Result<Vec<Transfer>, TransferPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .active_transfers()
            .filter(|transfer| filter.matches(transfer))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: TransferId,
        transfer: &NewTransfer,
    ) -> Result<Option<Transfer>, TransferPersistenceError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&transfer.user_id) {
            return Err(TransferPersistenceError::query(
                "referenced user does not exist",
            ));
        }
        let Some(slot) = tables.active_transfer_mut(id) else {
            return Ok(None);
        };
        *slot = Transfer::new(id, transfer.clone(), false);
        Ok(Some(slot.clone()))
    }

    async fn soft_delete(&self, id: TransferId) -> Result<bool, TransferPersistenceError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .active_transfer_mut(id)
            .map(Transfer::mark_deleted)
            .is_some())
    }

    async fn hard_delete(&self, id: TransferId) -> Result<bool, TransferPersistenceError> {
        Ok(self.tables.write().await.transfers.remove(&id).is_some())
    }

    async fn total_active_value(&self) -> Result<u64, TransferPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .active_transfers()
            .map(|transfer| u64::from(transfer.transfer_value()))
            .sum())
    }
}
