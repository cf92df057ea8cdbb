//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities shared by the HTTP and persistence
//! adapters, the classification rules applied to transfers, and the services
//! implementing the driving ports.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - User / UserProfile — registered account holders.
//! - Transfer / TransferDraft / TransferPatch — transfer records and inputs.
//! - UserDirectoryService / TransferLedgerService — use-case implementations.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod transfer;
pub mod user;

mod transfer_ledger_service;
mod user_directory_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::transfer::{
    NewTransfer, Party, Transfer, TransferDraft, TransferFilter, TransferFilterError, TransferId,
    TransferPatch, TransferType, TransferValidationError,
};
pub use self::transfer_ledger_service::TransferLedgerService;
pub use self::user::{Cnpj, User, UserId, UserName, UserProfile, UserValidationError};
pub use self::user_directory_service::UserDirectoryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use transfer_ledger::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
