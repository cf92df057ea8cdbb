//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};

use crate::domain::ports::{MockTransferLedger, MockUserDirectory};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::HttpState;

/// Wrap port mocks in handler state.
pub fn state_from_mocks(
    users: MockUserDirectory,
    transfers: MockTransferLedger,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(users), Arc::new(transfers)))
}

/// App serving the full `/api/v1` scope over the given mocks.
pub fn test_app(
    users: MockUserDirectory,
    transfers: MockTransferLedger,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state_from_mocks(users, transfers))
        .service(api_scope())
}
