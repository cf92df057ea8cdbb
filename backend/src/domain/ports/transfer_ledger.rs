//! Driving port for transfer bookkeeping.

use async_trait::async_trait;

use crate::domain::{Error, Transfer, TransferDraft, TransferFilter, TransferId, TransferPatch};

/// Use cases exposed to inbound adapters for the transfer resource.
///
/// Implementations classify every transfer on save and hide soft-deleted
/// records from all reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransferLedger: Send + Sync {
    /// Validate, classify and store a new transfer.
    async fn create_transfer(&self, draft: TransferDraft) -> Result<Transfer, Error>;

    /// Fetch an active transfer.
    async fn get_transfer(&self, id: TransferId) -> Result<Transfer, Error>;

    /// Active transfers in insertion order.
    async fn list_transfers(&self) -> Result<Vec<Transfer>, Error>;

    /// Merge `patch` into an active transfer and re-classify it.
    async fn update_transfer(&self, id: TransferId, patch: TransferPatch)
    -> Result<Transfer, Error>;

    /// Soft-delete an active transfer.
    async fn delete_transfer(&self, id: TransferId) -> Result<(), Error>;

    /// Physically remove a transfer, including soft-deleted ones.
    async fn purge_transfer(&self, id: TransferId) -> Result<(), Error>;

    /// Active transfers matching `filter`.
    async fn filter_transfers(&self, filter: TransferFilter) -> Result<Vec<Transfer>, Error>;

    /// Sum of active transfer values.
    async fn transfer_total(&self) -> Result<u64, Error>;
}
