//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on the driving
//! ports, so tests can swap in mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{TransferLedger, UserDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserDirectory>,
    pub transfers: Arc<dyn TransferLedger>,
}

impl HttpState {
    /// Bundle the user and transfer use-cases.
    pub fn new(users: Arc<dyn UserDirectory>, transfers: Arc<dyn TransferLedger>) -> Self {
        Self { users, transfers }
    }
}
