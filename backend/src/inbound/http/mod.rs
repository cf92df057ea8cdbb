//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod transfers;
pub mod users;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{Scope, web};

pub use error::ApiResult;

/// Build the `/api/v1` scope with every user and transfer route.
///
/// Literal paths (`/user/all`, `/transfer/total`, ...) are registered ahead
/// of the `{id}` patterns they would otherwise collide with. Trailing slashes
/// are trimmed inside the scope only, leaving `/docs/` untouched.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use transfer_ledger::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    web::scope("/api/v1")
        .wrap(NormalizePath::trim())
        .app_data(error::json_config())
        .app_data(error::path_config())
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(transfers::create_transfer)
        .service(transfers::list_transfers)
        .service(transfers::transfer_total)
        .service(transfers::filter_transfers)
        .service(transfers::purge_transfer)
        .service(transfers::get_transfer)
        .service(transfers::update_transfer)
        .service(transfers::delete_transfer)
}
