//! Transfer ledger service.
//!
//! Implements the [`TransferLedger`] driving port. Every save resolves the
//! owning user, runs [`TransferDraft::prepare`] against the injected clock and
//! only then touches the transfer repository.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    TransferLedger, TransferPersistenceError, TransferRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, Transfer, TransferDraft, TransferFilter, TransferId, TransferPatch,
    TransferValidationError, UserId,
};

fn map_transfer_repository_error(error: TransferPersistenceError) -> Error {
    match error {
        TransferPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("transfer repository unavailable: {message}"))
        }
        TransferPersistenceError::Query { message } => {
            Error::internal(format!("transfer repository error: {message}"))
        }
    }
}

fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_validation_error(error: TransferValidationError) -> Error {
    let details = match &error {
        TransferValidationError::ValueTooLarge { max, .. } => json!({
            "field": "transfer_value",
            "code": "value_too_large",
            "max": max,
        }),
        TransferValidationError::InvalidCreationDate { .. } => json!({
            "field": "creation_date",
            "code": "invalid_format",
        }),
        TransferValidationError::FieldTooLong { field, max } => json!({
            "field": field,
            "code": "too_long",
            "max": max,
        }),
    };
    Error::invalid_request(error.to_string()).with_details(details)
}

fn transfer_not_found(id: TransferId) -> Error {
    Error::not_found(format!("transfer {id} not found"))
}

/// Transfer service implementing the ledger driving port.
#[derive(Clone)]
pub struct TransferLedgerService<U, T> {
    user_repo: Arc<U>,
    transfer_repo: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, T> TransferLedgerService<U, T> {
    /// Create a new service from its repositories and clock.
    pub fn new(user_repo: Arc<U>, transfer_repo: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repo,
            transfer_repo,
            clock,
        }
    }
}

impl<U, T> TransferLedgerService<U, T>
where
    U: UserRepository,
    T: TransferRepository,
{
    async fn ensure_user_exists(&self, user_id: UserId) -> Result<(), Error> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?;
        if user.is_none() {
            return Err(
                Error::invalid_request(format!("user {user_id} does not exist")).with_details(
                    json!({ "field": "user_id", "code": "unknown_user" }),
                ),
            );
        }
        Ok(())
    }
}

#[async_trait]
impl<U, T> TransferLedger for TransferLedgerService<U, T>
where
    U: UserRepository,
    T: TransferRepository,
{
    async fn create_transfer(&self, draft: TransferDraft) -> Result<Transfer, Error> {
        let user_id = draft.user_id;
        let prepared = draft
            .prepare(self.clock.as_ref())
            .map_err(map_validation_error)?;
        self.ensure_user_exists(user_id).await?;

        let transfer = self
            .transfer_repo
            .create(&prepared)
            .await
            .map_err(map_transfer_repository_error)?;
        info!(
            transfer_id = %transfer.id(),
            user_id = %user_id,
            transfer_type = %transfer.transfer_type(),
            "transfer created"
        );
        Ok(transfer)
    }

    async fn get_transfer(&self, id: TransferId) -> Result<Transfer, Error> {
        self.transfer_repo
            .find_active_by_id(id)
            .await
            .map_err(map_transfer_repository_error)?
            .ok_or_else(|| transfer_not_found(id))
    }

    async fn list_transfers(&self) -> Result<Vec<Transfer>, Error> {
        self.transfer_repo
            .list_active()
            .await
            .map_err(map_transfer_repository_error)
    }

    async fn update_transfer(
        &self,
        id: TransferId,
        patch: TransferPatch,
    ) -> Result<Transfer, Error> {
        let current = self.get_transfer(id).await?;
        let user_changed = patch.user_id.is_some_and(|user| user != current.user_id());
        let draft = current.apply_patch(patch);
        let user_id = draft.user_id;
        let prepared = draft
            .prepare(self.clock.as_ref())
            .map_err(map_validation_error)?;
        if user_changed {
            self.ensure_user_exists(user_id).await?;
        }

        let transfer = self
            .transfer_repo
            .update(id, &prepared)
            .await
            .map_err(map_transfer_repository_error)?
            .ok_or_else(|| transfer_not_found(id))?;
        debug!(
            transfer_id = %id,
            transfer_type = %transfer.transfer_type(),
            "transfer updated"
        );
        Ok(transfer)
    }

    async fn delete_transfer(&self, id: TransferId) -> Result<(), Error> {
        let removed = self
            .transfer_repo
            .soft_delete(id)
            .await
            .map_err(map_transfer_repository_error)?;
        if !removed {
            return Err(transfer_not_found(id));
        }
        info!(transfer_id = %id, "transfer soft-deleted");
        Ok(())
    }

    async fn purge_transfer(&self, id: TransferId) -> Result<(), Error> {
        let removed = self
            .transfer_repo
            .hard_delete(id)
            .await
            .map_err(map_transfer_repository_error)?;
        if !removed {
            return Err(transfer_not_found(id));
        }
        info!(transfer_id = %id, "transfer purged");
        Ok(())
    }

    async fn filter_transfers(&self, filter: TransferFilter) -> Result<Vec<Transfer>, Error> {
        self.transfer_repo
            .filter_active(&filter)
            .await
            .map_err(map_transfer_repository_error)
    }

    async fn transfer_total(&self) -> Result<u64, Error> {
        self.transfer_repo
            .total_active_value()
            .await
            .map_err(map_transfer_repository_error)
    }
}

#[cfg(test)]
#[path = "transfer_ledger_service_tests.rs"]
mod tests;
