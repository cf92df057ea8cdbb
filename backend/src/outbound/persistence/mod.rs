//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the record-store ports backed by PostgreSQL
//! through `diesel-async` and a `bb8` connection pool.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module; repositories translate rows into domain types and map every
//! database failure onto the port's error enum.
//!
//! # Example
//!
//! ```ignore
//! use transfer_ledger::outbound::persistence::{
//!     DbPool, DieselTransferRepository, PoolConfig, run_migrations,
//! };
//!
//! run_migrations("postgres://localhost/ledger").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/ledger")).await?;
//! let transfers = DieselTransferRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_transfer_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_transfer_repository::DieselTransferRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
