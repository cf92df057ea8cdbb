//! Outbound adapters implementing the record-store ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local store used without a database and in tests
//!
//! Adapters only translate between domain types and storage representations.

pub mod memory;
pub mod persistence;
