//! Transfer API handlers.
//!
//! ```text
//! POST   /api/v1/transfer/new                    {"user_id":1,"payers_bank":"001",...}
//! GET    /api/v1/transfer/all
//! GET    /api/v1/transfer/total
//! GET    /api/v1/transfer/filter/{type}/{value}  type is date, payer or receiver
//! GET    /api/v1/transfer/{id}
//! PUT    /api/v1/transfer/{id}                   partial body
//! DELETE /api/v1/transfer/{id}                   soft delete
//! DELETE /api/v1/transfer/{id}/purge             hard delete
//! ```
//!
//! `transfer_type` is always derived server side; a client-supplied value is
//! ignored.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::transfer::parse_creation_date;
use crate::domain::{
    Error, Party, Transfer, TransferDraft, TransferFilter, TransferFilterError, TransferId,
    TransferPatch, TransferValidationError, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, TransferSchema};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /transfer/new`.
///
/// Every field but `user_id` is optional. Party fields default to empty
/// strings, `transfer_value` to 1 and `creation_date` to the server's local
/// time.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TransferRequest {
    #[schema(example = 1)]
    pub user_id: Option<i64>,
    pub payers_name: Option<String>,
    pub payers_bank: Option<String>,
    pub payers_agency: Option<String>,
    pub payers_account: Option<String>,
    pub receivers_name: Option<String>,
    pub receivers_bank: Option<String>,
    pub receivers_agency: Option<String>,
    pub receivers_account: Option<String>,
    #[schema(example = 1500)]
    pub transfer_value: Option<u32>,
    /// `YYYY-MM-DDTHH:MM:SS`; any other layout is rejected.
    #[schema(example = "2019-06-01T12:30:00")]
    pub creation_date: Option<String>,
}

/// Request body for `PUT /transfer/{id}`. Absent fields keep their stored
/// value; the type is recomputed from the merged record.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TransferPatchRequest {
    pub user_id: Option<i64>,
    pub payers_name: Option<String>,
    pub payers_bank: Option<String>,
    pub payers_agency: Option<String>,
    pub payers_account: Option<String>,
    pub receivers_name: Option<String>,
    pub receivers_bank: Option<String>,
    pub receivers_agency: Option<String>,
    pub receivers_account: Option<String>,
    pub transfer_value: Option<u32>,
    #[schema(example = "2019-06-01T12:30:00")]
    pub creation_date: Option<String>,
}

/// Response body for `GET /transfer/total`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TransferTotal {
    /// Sum of `transfer_value` over transfers that are not soft-deleted.
    #[schema(example = 1000)]
    pub transfer_total: u64,
}

fn map_creation_date_error(err: TransferValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "creation_date", "code": "invalid_format" }))
}

fn map_filter_error(err: TransferFilterError) -> Error {
    let details = match &err {
        TransferFilterError::UnknownKind { kind } => {
            json!({ "field": "type", "code": "unknown_filter", "value": kind })
        }
        TransferFilterError::InvalidDate { .. } => {
            json!({ "field": "value", "code": "invalid_date" })
        }
    };
    Error::invalid_request(err.to_string()).with_details(details)
}

// An empty string counts as absent.
fn parse_optional_date(raw: Option<String>) -> Result<Option<NaiveDateTime>, Error> {
    raw.as_deref()
        .filter(|value| !value.is_empty())
        .map(parse_creation_date)
        .transpose()
        .map_err(map_creation_date_error)
}

impl TransferRequest {
    fn into_draft(self) -> Result<TransferDraft, Error> {
        let user_id = self.user_id.ok_or_else(|| {
            Error::invalid_request("user_id is required")
                .with_details(json!({ "field": "user_id", "code": "missing" }))
        })?;
        let mut draft = TransferDraft::new(UserId::new(user_id));
        draft.payer = Party {
            name: self.payers_name.unwrap_or_default(),
            bank: self.payers_bank.unwrap_or_default(),
            agency: self.payers_agency.unwrap_or_default(),
            account: self.payers_account.unwrap_or_default(),
        };
        draft.receiver = Party {
            name: self.receivers_name.unwrap_or_default(),
            bank: self.receivers_bank.unwrap_or_default(),
            agency: self.receivers_agency.unwrap_or_default(),
            account: self.receivers_account.unwrap_or_default(),
        };
        if let Some(value) = self.transfer_value {
            draft.transfer_value = value;
        }
        draft.creation_date = parse_optional_date(self.creation_date)?;
        Ok(draft)
    }
}

impl TryFrom<TransferPatchRequest> for TransferPatch {
    type Error = Error;

    fn try_from(value: TransferPatchRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: value.user_id.map(UserId::new),
            payers_name: value.payers_name,
            payers_bank: value.payers_bank,
            payers_agency: value.payers_agency,
            payers_account: value.payers_account,
            receivers_name: value.receivers_name,
            receivers_bank: value.receivers_bank,
            receivers_agency: value.receivers_agency,
            receivers_account: value.receivers_account,
            transfer_value: value.transfer_value,
            creation_date: parse_optional_date(value.creation_date)?,
        })
    }
}

/// Record a transfer.
#[utoipa::path(
    post,
    path = "/api/v1/transfer/new",
    request_body = TransferRequest,
    responses(
        (status = 201, description = "Transfer created and classified", body = TransferSchema),
        (status = 400, description = "Value above ceiling, unknown user or bad date", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["transfers"],
    operation_id = "createTransfer"
)]
#[post("/transfer/new")]
pub async fn create_transfer(
    state: web::Data<HttpState>,
    payload: web::Json<TransferRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let transfer = state.transfers.create_transfer(draft).await?;
    Ok(HttpResponse::Created().json(transfer))
}

/// List transfers that are not soft-deleted, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/transfer/all",
    responses(
        (status = 200, description = "Transfers", body = [TransferSchema]),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["transfers"],
    operation_id = "listTransfers"
)]
#[get("/transfer/all")]
pub async fn list_transfers(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Transfer>>> {
    state.transfers.list_transfers().await.map(web::Json)
}

/// Sum the values of transfers that are not soft-deleted.
#[utoipa::path(
    get,
    path = "/api/v1/transfer/total",
    responses(
        (status = 200, description = "Total transferred value", body = TransferTotal),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["transfers"],
    operation_id = "transferTotal"
)]
#[get("/transfer/total")]
pub async fn transfer_total(state: web::Data<HttpState>) -> ApiResult<web::Json<TransferTotal>> {
    let transfer_total = state.transfers.transfer_total().await?;
    Ok(web::Json(TransferTotal { transfer_total }))
}

/// Filter active transfers by creation day, payer name or receiver name.
#[utoipa::path(
    get,
    path = "/api/v1/transfer/filter/{type}/{value}",
    params(
        ("type" = String, Path, description = "One of date, payer or receiver"),
        ("value" = String, Path, description = "YYYY-MM-DD for date, exact name otherwise")
    ),
    responses(
        (status = 200, description = "Matching transfers", body = [TransferSchema]),
        (status = 400, description = "Unknown filter type or bad date", body = ErrorSchema)
    ),
    tags = ["transfers"],
    operation_id = "filterTransfers"
)]
#[get("/transfer/filter/{type}/{value}")]
pub async fn filter_transfers(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Vec<Transfer>>> {
    let (kind, value) = path.into_inner();
    let filter = TransferFilter::parse(&kind, &value).map_err(map_filter_error)?;
    state.transfers.filter_transfers(filter).await.map(web::Json)
}

/// Fetch one active transfer.
#[utoipa::path(
    get,
    path = "/api/v1/transfer/{id}",
    params(("id" = i64, Path, description = "Transfer identifier")),
    responses(
        (status = 200, description = "Transfer", body = TransferSchema),
        (status = 404, description = "Unknown or deleted transfer", body = ErrorSchema)
    ),
    tags = ["transfers"],
    operation_id = "getTransfer"
)]
#[get("/transfer/{id}")]
pub async fn get_transfer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Transfer>> {
    let id = TransferId::new(path.into_inner());
    state.transfers.get_transfer(id).await.map(web::Json)
}

/// Patch an active transfer and reclassify it.
#[utoipa::path(
    put,
    path = "/api/v1/transfer/{id}",
    params(("id" = i64, Path, description = "Transfer identifier")),
    request_body = TransferPatchRequest,
    responses(
        (status = 200, description = "Updated transfer", body = TransferSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown or deleted transfer", body = ErrorSchema)
    ),
    tags = ["transfers"],
    operation_id = "updateTransfer"
)]
#[put("/transfer/{id}")]
pub async fn update_transfer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<TransferPatchRequest>,
) -> ApiResult<web::Json<Transfer>> {
    let id = TransferId::new(path.into_inner());
    let patch = TransferPatch::try_from(payload.into_inner())?;
    state.transfers.update_transfer(id, patch).await.map(web::Json)
}

/// Soft-delete a transfer. The record stays stored but disappears from
/// every listing, filter, total and lookup.
#[utoipa::path(
    delete,
    path = "/api/v1/transfer/{id}",
    params(("id" = i64, Path, description = "Transfer identifier")),
    responses(
        (status = 200, description = "Transfer soft-deleted"),
        (status = 404, description = "Unknown or already deleted transfer", body = ErrorSchema)
    ),
    tags = ["transfers"],
    operation_id = "deleteTransfer"
)]
#[delete("/transfer/{id}")]
pub async fn delete_transfer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = TransferId::new(path.into_inner());
    state.transfers.delete_transfer(id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Remove a transfer permanently, whether or not it was soft-deleted.
#[utoipa::path(
    delete,
    path = "/api/v1/transfer/{id}/purge",
    params(("id" = i64, Path, description = "Transfer identifier")),
    responses(
        (status = 200, description = "Transfer removed"),
        (status = 404, description = "Unknown transfer", body = ErrorSchema)
    ),
    tags = ["transfers"],
    operation_id = "purgeTransfer"
)]
#[delete("/transfer/{id}/purge")]
pub async fn purge_transfer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = TransferId::new(path.into_inner());
    state.transfers.purge_transfer(id).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "transfers_tests.rs"]
mod tests;
