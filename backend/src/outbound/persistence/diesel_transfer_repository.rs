//! PostgreSQL-backed `TransferRepository` implementation using Diesel ORM.
//!
//! Soft deletion is a flag on the row; every read except `hard_delete`
//! filters on `is_deleted = false` in SQL.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TransferPersistenceError, TransferRepository};
use crate::domain::{
    NewTransfer, Party, Transfer, TransferFilter, TransferId, TransferType, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{TransferFieldsRow, TransferRow};
use super::pool::{DbPool, PoolError};
use super::schema::transfers;

/// Diesel-backed implementation of the transfer repository port.
#[derive(Clone)]
pub struct DieselTransferRepository {
    pool: DbPool,
}

impl DieselTransferRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TransferPersistenceError {
    map_basic_pool_error(error, TransferPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TransferPersistenceError {
    map_basic_diesel_error(
        error,
        TransferPersistenceError::query,
        TransferPersistenceError::connection,
    )
}

fn to_fields_row(
    transfer: &NewTransfer,
) -> Result<TransferFieldsRow<'_>, TransferPersistenceError> {
    let transfer_value = i32::try_from(transfer.transfer_value).map_err(|_| {
        TransferPersistenceError::query(format!(
            "transfer value {} does not fit the column",
            transfer.transfer_value
        ))
    })?;
    Ok(TransferFieldsRow {
        user_id: transfer.user_id.get(),
        payers_name: &transfer.payer.name,
        payers_bank: &transfer.payer.bank,
        payers_agency: &transfer.payer.agency,
        payers_account: &transfer.payer.account,
        receivers_name: &transfer.receiver.name,
        receivers_bank: &transfer.receiver.bank,
        receivers_agency: &transfer.receiver.agency,
        receivers_account: &transfer.receiver.account,
        transfer_value,
        transfer_type: transfer.transfer_type.as_str(),
        creation_date: transfer.creation_date,
    })
}

/// Convert a database row into a domain transfer.
fn row_to_transfer(row: TransferRow) -> Result<Transfer, TransferPersistenceError> {
    let TransferRow {
        id,
        user_id,
        payers_name,
        payers_bank,
        payers_agency,
        payers_account,
        receivers_name,
        receivers_bank,
        receivers_agency,
        receivers_account,
        transfer_value,
        transfer_type,
        creation_date,
        is_deleted,
    } = row;

    let transfer_value = u32::try_from(transfer_value).map_err(|_| {
        TransferPersistenceError::query(format!(
            "stored transfer {id} has negative value {transfer_value}"
        ))
    })?;
    let transfer_type = transfer_type
        .parse::<TransferType>()
        .map_err(|err| TransferPersistenceError::query(format!("stored transfer {id}: {err}")))?;

    let fields = NewTransfer {
        user_id: UserId::new(user_id),
        payer: Party {
            name: payers_name,
            bank: payers_bank,
            agency: payers_agency,
            account: payers_account,
        },
        receiver: Party {
            name: receivers_name,
            bank: receivers_bank,
            agency: receivers_agency,
            account: receivers_account,
        },
        transfer_value,
        transfer_type,
        creation_date,
    };
    Ok(Transfer::new(TransferId::new(id), fields, is_deleted))
}

fn rows_to_transfers(rows: Vec<TransferRow>) -> Result<Vec<Transfer>, TransferPersistenceError> {
    rows.into_iter().map(row_to_transfer).collect()
}

fn active_transfers() -> transfers::BoxedQuery<'static, Pg> {
    transfers::table
        .filter(transfers::is_deleted.eq(false))
        .into_boxed()
}

fn apply_filter(
    query: transfers::BoxedQuery<'static, Pg>,
    filter: &TransferFilter,
) -> transfers::BoxedQuery<'static, Pg> {
    match filter {
        TransferFilter::Date(day) => {
            let start = day.and_time(chrono::NaiveTime::MIN);
            let query = query.filter(transfers::creation_date.ge(start));
            match day.succ_opt() {
                Some(next) => {
                    query.filter(transfers::creation_date.lt(next.and_time(chrono::NaiveTime::MIN)))
                }
                None => query,
            }
        }
        TransferFilter::Payer(name) => query.filter(transfers::payers_name.eq(name.clone())),
        TransferFilter::Receiver(name) => query.filter(transfers::receivers_name.eq(name.clone())),
    }
}

#[async_trait]
impl TransferRepository for DieselTransferRepository {
    async fn create(&self, transfer: &NewTransfer) -> Result<Transfer, TransferPersistenceError> {
        let fields = to_fields_row(transfer)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(transfers::table)
            .values(&fields)
            .returning(TransferRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_transfer(row)
    }

    async fn find_active_by_id(
        &self,
        id: TransferId,
    ) -> Result<Option<Transfer>, TransferPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = active_transfers()
            .filter(transfers::id.eq(id.get()))
            .select(TransferRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_transfer).transpose()
    }

    async fn list_active(&self) -> Result<Vec<Transfer>, TransferPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TransferRow> = active_transfers()
            .order(transfers::id.asc())
            .select(TransferRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_transfers(rows)
    }

    async fn filter_active(
        &self,
        filter: &TransferFilter,
    ) -> Result<Vec<Transfer>, TransferPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TransferRow> = apply_filter(active_transfers(), filter)
            .order(transfers::id.asc())
            .select(TransferRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_transfers(rows)
    }

    async fn update(
        &self,
        id: TransferId,
        transfer: &NewTransfer,
    ) -> Result<Option<Transfer>, TransferPersistenceError> {
        let fields = to_fields_row(transfer)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            transfers::table
                .filter(transfers::id.eq(id.get()))
                .filter(transfers::is_deleted.eq(false)),
        )
        .set(&fields)
        .returning(TransferRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_transfer).transpose()
    }

    async fn soft_delete(&self, id: TransferId) -> Result<bool, TransferPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let flagged = diesel::update(
            transfers::table
                .filter(transfers::id.eq(id.get()))
                .filter(transfers::is_deleted.eq(false)),
        )
        .set(transfers::is_deleted.eq(true))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(flagged > 0)
    }

    async fn hard_delete(&self, id: TransferId) -> Result<bool, TransferPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(transfers::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn total_active_value(&self) -> Result<u64, TransferPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: Option<i64> = transfers::table
            .filter(transfers::is_deleted.eq(false))
            .select(diesel::dsl::sum(transfers::transfer_value))
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        u64::try_from(total.unwrap_or(0))
            .map_err(|_| TransferPersistenceError::query("transfer total is negative"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::test_support::clock::timestamp;

    #[fixture]
    fn valid_row() -> TransferRow {
        TransferRow {
            id: 11,
            user_id: 2,
            payers_name: "Alice".to_owned(),
            payers_bank: "Bank A".to_owned(),
            payers_agency: "0001".to_owned(),
            payers_account: "1-1".to_owned(),
            receivers_name: "Bob".to_owned(),
            receivers_bank: "Bank B".to_owned(),
            receivers_agency: "0002".to_owned(),
            receivers_account: "2-2".to_owned(),
            transfer_value: 700,
            transfer_type: "TED".to_owned(),
            creation_date: timestamp(2019, 1, 1, 12, 0, 0),
            is_deleted: false,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, TransferPersistenceError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn row_conversion_rebuilds_parties(valid_row: TransferRow) {
        let transfer = row_to_transfer(valid_row).expect("valid row");

        assert_eq!(transfer.id(), TransferId::new(11));
        assert_eq!(transfer.payer().account, "1-1");
        assert_eq!(transfer.receiver().bank, "Bank B");
        assert_eq!(transfer.transfer_type(), TransferType::Ted);
        assert!(!transfer.is_deleted());
    }

    #[rstest]
    fn row_conversion_rejects_unknown_type(mut valid_row: TransferRow) {
        valid_row.transfer_type = "PIX".to_owned();

        let error = row_to_transfer(valid_row).expect_err("unknown type");
        assert!(matches!(error, TransferPersistenceError::Query { .. }));
        assert!(error.to_string().contains("PIX"));
    }

    #[rstest]
    fn row_conversion_rejects_negative_value(mut valid_row: TransferRow) {
        valid_row.transfer_value = -1;

        let error = row_to_transfer(valid_row).expect_err("negative value");
        assert!(error.to_string().contains("negative value"));
    }

    #[rstest]
    fn fields_row_borrows_classified_transfer(valid_row: TransferRow) {
        let transfer = row_to_transfer(valid_row).expect("valid row");
        let new = NewTransfer {
            user_id: transfer.user_id(),
            payer: transfer.payer().clone(),
            receiver: transfer.receiver().clone(),
            transfer_value: transfer.transfer_value(),
            transfer_type: transfer.transfer_type(),
            creation_date: transfer.creation_date(),
        };

        let fields = to_fields_row(&new).expect("fits columns");
        assert_eq!(fields.transfer_value, 700);
        assert_eq!(fields.transfer_type, "TED");
        assert_eq!(fields.payers_agency, "0001");
    }
}
