//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{transfers, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub cnpj: String,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub cnpj: &'a str,
}

/// Changeset struct for replacing a user's profile.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub cnpj: &'a str,
}

// ---------------------------------------------------------------------------
// Transfer models
// ---------------------------------------------------------------------------

/// Row struct for reading from the transfers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = transfers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TransferRow {
    pub id: i64,
    pub user_id: i64,
    pub payers_name: String,
    pub payers_bank: String,
    pub payers_agency: String,
    pub payers_account: String,
    pub receivers_name: String,
    pub receivers_bank: String,
    pub receivers_agency: String,
    pub receivers_account: String,
    pub transfer_value: i32,
    pub transfer_type: String,
    pub creation_date: NaiveDateTime,
    pub is_deleted: bool,
}

/// Classified transfer columns, used both to insert and to overwrite a row.
///
/// `is_deleted` is absent so updates never resurrect or hide a record.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = transfers)]
pub(crate) struct TransferFieldsRow<'a> {
    pub user_id: i64,
    pub payers_name: &'a str,
    pub payers_bank: &'a str,
    pub payers_agency: &'a str,
    pub payers_account: &'a str,
    pub receivers_name: &'a str,
    pub receivers_bank: &'a str,
    pub receivers_agency: &'a str,
    pub receivers_account: &'a str,
    pub transfer_value: i32,
    pub transfer_type: &'a str,
    pub creation_date: NaiveDateTime,
}
