//! Port abstraction for transfer persistence adapters.
//!
//! Every read except [`TransferRepository::hard_delete`] ignores soft-deleted
//! rows; adapters are expected to apply that filter in the store itself.
use async_trait::async_trait;

use crate::domain::{NewTransfer, Transfer, TransferFilter, TransferId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by transfer repository adapters.
    pub enum TransferPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "transfer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "transfer repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransferRepository: Send + Sync {
    /// Insert a classified transfer.
    async fn create(&self, transfer: &NewTransfer) -> Result<Transfer, TransferPersistenceError>;

    /// Fetch a transfer that has not been soft-deleted.
    async fn find_active_by_id(
        &self,
        id: TransferId,
    ) -> Result<Option<Transfer>, TransferPersistenceError>;

    /// Active transfers in insertion order.
    async fn list_active(&self) -> Result<Vec<Transfer>, TransferPersistenceError>;

    /// Active transfers matching `filter`, in insertion order.
    async fn filter_active(
        &self,
        filter: &TransferFilter,
    ) -> Result<Vec<Transfer>, TransferPersistenceError>;

    /// Overwrite an active transfer. Returns `None` when no active row exists.
    async fn update(
        &self,
        id: TransferId,
        transfer: &NewTransfer,
    ) -> Result<Option<Transfer>, TransferPersistenceError>;

    /// Flag an active transfer as deleted. Returns `false` when no active
    /// row exists.
    async fn soft_delete(&self, id: TransferId) -> Result<bool, TransferPersistenceError>;

    /// Physically remove a transfer whatever its deletion state.
    async fn hard_delete(&self, id: TransferId) -> Result<bool, TransferPersistenceError>;

    /// Sum of `transfer_value` over active transfers; zero when none exist.
    async fn total_active_value(&self) -> Result<u64, TransferPersistenceError>;
}
