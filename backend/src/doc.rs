//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `inbound::http` together with the
//! schema wrappers from [`crate::inbound::http::schemas`], so domain types
//! stay free of `utoipa`. The document backs Swagger UI in debug builds and
//! is printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, TransferSchema, TransferTypeSchema, UserSchema,
};
use crate::inbound::http::transfers::{TransferPatchRequest, TransferRequest, TransferTotal};
use crate::inbound::http::users::UserRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Transfer ledger API",
        description = "Users, bank transfers and their CC/TED/DOC classification."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::transfers::create_transfer,
        crate::inbound::http::transfers::list_transfers,
        crate::inbound::http::transfers::transfer_total,
        crate::inbound::http::transfers::filter_transfers,
        crate::inbound::http::transfers::get_transfer,
        crate::inbound::http::transfers::update_transfer,
        crate::inbound::http::transfers::delete_transfer,
        crate::inbound::http::transfers::purge_transfer,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        TransferSchema,
        TransferTypeSchema,
        ErrorSchema,
        ErrorCodeSchema,
        UserRequest,
        TransferRequest,
        TransferPatchRequest,
        TransferTotal
    )),
    tags(
        (name = "users", description = "Registered account holders"),
        (name = "transfers", description = "Transfer records and aggregates"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
