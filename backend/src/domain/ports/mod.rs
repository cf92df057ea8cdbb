//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain talks to the record store; each
//! exposes a typed error so adapters map their failures into predictable
//! variants. Driving ports are the use cases inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod transfer_ledger;
mod transfer_repository;
mod user_directory;
mod user_repository;

pub use transfer_ledger::TransferLedger;
#[cfg(test)]
pub use transfer_ledger::MockTransferLedger;
#[cfg(test)]
pub use transfer_repository::MockTransferRepository;
pub use transfer_repository::{TransferPersistenceError, TransferRepository};
pub use user_directory::UserDirectory;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
