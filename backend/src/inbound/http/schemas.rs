//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of `utoipa`. The wrappers here mirror their wire
//! shape and are registered under the domain type names via `#[schema(as)]`.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The record store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error payload with a machine-readable code and a human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "transfer value cannot exceed 100000 (got 100001)")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Structured detail, e.g. the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i64,
    /// Company name.
    #[schema(example = "Acme Ltda", max_length = 128)]
    name: String,
    /// Brazilian company registry number; not checksum-validated.
    #[schema(example = "12345678000199", max_length = 14)]
    cnpj: String,
}

/// OpenAPI schema for [`crate::domain::TransferType`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TransferType)]
pub enum TransferTypeSchema {
    /// Same bank on both sides.
    #[schema(rename = "CC")]
    Cc,
    /// Value below 5000 created between 11:00 and 15:59.
    #[schema(rename = "TED")]
    Ted,
    /// Any other transfer.
    #[schema(rename = "DOC")]
    Doc,
}

/// OpenAPI schema for [`crate::domain::Transfer`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Transfer)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TransferSchema {
    #[schema(example = 1)]
    id: i64,
    /// Owning user.
    #[schema(example = 1)]
    user_id: i64,
    payers_name: String,
    payers_bank: String,
    payers_agency: String,
    payers_account: String,
    receivers_name: String,
    receivers_bank: String,
    receivers_agency: String,
    receivers_account: String,
    #[schema(example = 1500, minimum = 0, maximum = 100000)]
    transfer_value: u32,
    /// Derived on every save; client-supplied values are ignored.
    transfer_type: TransferTypeSchema,
    /// Local timestamp in `YYYY-MM-DDTHH:MM:SS` form.
    #[schema(example = "2019-06-01T12:30:00")]
    creation_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("\"traceId\""), "{schema_json}");
        assert!(schema_json.contains("\"message\""), "{schema_json}");
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in ["invalid_request", "not_found", "service_unavailable", "internal_error"] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn transfer_type_schema_uses_wire_labels() {
        let schema_json = schema_to_json::<TransferTypeSchema>();
        for label in ["\"CC\"", "\"TED\"", "\"DOC\""] {
            assert!(schema_json.contains(label), "missing {label}");
        }
    }

    #[test]
    fn transfer_schema_exposes_flat_fields() {
        let schema_json = schema_to_json::<TransferSchema>();
        for field in ["payers_bank", "receivers_account", "transfer_type", "creation_date"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
        assert!(!schema_json.contains("is_deleted"));
    }
}
