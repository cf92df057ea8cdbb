//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Int8,
        /// Display name (max 128 characters).
        name -> Varchar,
        /// Registry number (max 14 characters).
        cnpj -> Varchar,
    }
}

diesel::table! {
    /// Transfer records, including soft-deleted ones.
    transfers (id) {
        id -> Int8,
        /// Owning user; rows cascade when the user is removed.
        user_id -> Int8,
        payers_name -> Varchar,
        payers_bank -> Varchar,
        payers_agency -> Varchar,
        payers_account -> Varchar,
        receivers_name -> Varchar,
        receivers_bank -> Varchar,
        receivers_agency -> Varchar,
        receivers_account -> Varchar,
        /// Constrained to 0..=100000 by a CHECK.
        transfer_value -> Int4,
        /// One of `CC`, `TED`, `DOC`.
        transfer_type -> Varchar,
        /// Naive local timestamp.
        creation_date -> Timestamp,
        is_deleted -> Bool,
    }
}

diesel::joinable!(transfers -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, transfers);
