//! Transfer aggregate.
//!
//! A transfer moves `transfer_value` from a payer to a receiver on behalf of a
//! registered user. Its [`TransferType`] is never taken from clients; it is
//! derived by [`classification`] every time the record is saved.

pub mod classification;
pub mod filter;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::UserId;

pub use self::classification::{
    CREATION_DATE_FORMAT, MAX_TRANSFER_VALUE, TED_VALUE_LIMIT, classify, parse_creation_date,
    validate_transfer_value,
};
pub use self::filter::{TransferFilter, TransferFilterError};

/// Maximum length of every payer/receiver text field, in characters.
pub const PARTY_FIELD_MAX: usize = 128;

/// Value assigned when a client omits `transfer_value`.
pub const DEFAULT_TRANSFER_VALUE: u32 = 1;

/// Validation failures raised while preparing a transfer for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferValidationError {
    ValueTooLarge { max: u32, actual: u32 },
    InvalidCreationDate { value: String },
    FieldTooLong { field: &'static str, max: usize },
}

impl fmt::Display for TransferValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueTooLarge { max, actual } => {
                write!(f, "transfer value cannot exceed {max} (got {actual})")
            }
            Self::InvalidCreationDate { value } => write!(
                f,
                "creation_date '{value}' does not match the YYYY-MM-DDTHH:MM:SS format"
            ),
            Self::FieldTooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for TransferValidationError {}

/// Store-assigned transfer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferId(i64);

impl TransferId {
    /// Wrap a raw store identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settlement type derived from the transfer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferType {
    /// Payer and receiver share a bank.
    #[serde(rename = "CC")]
    Cc,
    /// Low-value transfer created during business hours.
    #[serde(rename = "TED")]
    Ted,
    /// Everything else; settles the next day.
    #[serde(rename = "DOC")]
    Doc,
}

impl TransferType {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cc => "CC",
            Self::Ted => "TED",
            Self::Doc => "DOC",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown transfer type label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transfer type: {0}")]
pub struct ParseTransferTypeError(pub String);

impl FromStr for TransferType {
    type Err = ParseTransferTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CC" => Ok(Self::Cc),
            "TED" => Ok(Self::Ted),
            "DOC" => Ok(Self::Doc),
            other => Err(ParseTransferTypeError(other.to_owned())),
        }
    }
}

/// One side of a transfer: who, and which bank account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Party {
    pub name: String,
    pub bank: String,
    pub agency: String,
    pub account: String,
}

impl Party {
    fn validate(&self, side: PartySide) -> Result<(), TransferValidationError> {
        let fields = [
            (side.field("name"), &self.name),
            (side.field("bank"), &self.bank),
            (side.field("agency"), &self.agency),
            (side.field("account"), &self.account),
        ];
        for (field, value) in fields {
            if value.chars().count() > PARTY_FIELD_MAX {
                return Err(TransferValidationError::FieldTooLong {
                    field,
                    max: PARTY_FIELD_MAX,
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum PartySide {
    Payer,
    Receiver,
}

impl PartySide {
    fn field(self, suffix: &str) -> &'static str {
        match (self, suffix) {
            (Self::Payer, "name") => "payers_name",
            (Self::Payer, "bank") => "payers_bank",
            (Self::Payer, "agency") => "payers_agency",
            (Self::Payer, _) => "payers_account",
            (Self::Receiver, "name") => "receivers_name",
            (Self::Receiver, "bank") => "receivers_bank",
            (Self::Receiver, "agency") => "receivers_agency",
            (Self::Receiver, _) => "receivers_account",
        }
    }
}

/// Unclassified transfer fields as supplied by a client or rebuilt from a
/// stored record before re-saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferDraft {
    pub user_id: UserId,
    pub payer: Party,
    pub receiver: Party,
    pub transfer_value: u32,
    pub creation_date: Option<NaiveDateTime>,
}

impl TransferDraft {
    /// Start a draft for `user_id` with every other field at its default.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            payer: Party::default(),
            receiver: Party::default(),
            transfer_value: DEFAULT_TRANSFER_VALUE,
            creation_date: None,
        }
    }

    pub(crate) fn validate_parties(&self) -> Result<(), TransferValidationError> {
        self.payer.validate(PartySide::Payer)?;
        self.receiver.validate(PartySide::Receiver)
    }
}

/// Classified transfer ready to be written to the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransfer {
    pub user_id: UserId,
    pub payer: Party,
    pub receiver: Party,
    pub transfer_value: u32,
    pub transfer_type: TransferType,
    pub creation_date: NaiveDateTime,
}

/// Partial update applied by `PUT /transfer/{id}`. Absent fields keep their
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPatch {
    pub user_id: Option<UserId>,
    pub payers_name: Option<String>,
    pub payers_bank: Option<String>,
    pub payers_agency: Option<String>,
    pub payers_account: Option<String>,
    pub receivers_name: Option<String>,
    pub receivers_bank: Option<String>,
    pub receivers_agency: Option<String>,
    pub receivers_account: Option<String>,
    pub transfer_value: Option<u32>,
    pub creation_date: Option<NaiveDateTime>,
}

/// Persisted transfer.
///
/// Serialises to the flat wire shape (`payers_name`, `receivers_bank`, ...);
/// the soft-delete flag is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "TransferDto")]
pub struct Transfer {
    id: TransferId,
    user_id: UserId,
    payer: Party,
    receiver: Party,
    transfer_value: u32,
    transfer_type: TransferType,
    creation_date: NaiveDateTime,
    is_deleted: bool,
}

impl Transfer {
    /// Combine a store identifier with classified fields.
    pub fn new(id: TransferId, fields: NewTransfer, is_deleted: bool) -> Self {
        let NewTransfer {
            user_id,
            payer,
            receiver,
            transfer_value,
            transfer_type,
            creation_date,
        } = fields;
        Self {
            id,
            user_id,
            payer,
            receiver,
            transfer_value,
            transfer_type,
            creation_date,
            is_deleted,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> TransferId {
        self.id
    }

    /// Owning user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Paying side.
    pub fn payer(&self) -> &Party {
        &self.payer
    }

    /// Receiving side.
    pub fn receiver(&self) -> &Party {
        &self.receiver
    }

    /// Transferred amount.
    pub fn transfer_value(&self) -> u32 {
        self.transfer_value
    }

    /// Derived settlement type.
    pub fn transfer_type(&self) -> TransferType {
        self.transfer_type
    }

    /// Creation timestamp.
    pub fn creation_date(&self) -> NaiveDateTime {
        self.creation_date
    }

    /// Whether the record has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Flag the record as soft-deleted.
    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }

    /// Merge `patch` over the stored fields, producing a draft to re-classify.
    ///
    /// The stored creation date is carried over so the type is recomputed
    /// against the original timestamp unless the patch replaces it.
    pub fn apply_patch(&self, patch: TransferPatch) -> TransferDraft {
        let TransferPatch {
            user_id,
            payers_name,
            payers_bank,
            payers_agency,
            payers_account,
            receivers_name,
            receivers_bank,
            receivers_agency,
            receivers_account,
            transfer_value,
            creation_date,
        } = patch;
        let payer = Party {
            name: payers_name.unwrap_or_else(|| self.payer.name.clone()),
            bank: payers_bank.unwrap_or_else(|| self.payer.bank.clone()),
            agency: payers_agency.unwrap_or_else(|| self.payer.agency.clone()),
            account: payers_account.unwrap_or_else(|| self.payer.account.clone()),
        };
        let receiver = Party {
            name: receivers_name.unwrap_or_else(|| self.receiver.name.clone()),
            bank: receivers_bank.unwrap_or_else(|| self.receiver.bank.clone()),
            agency: receivers_agency.unwrap_or_else(|| self.receiver.agency.clone()),
            account: receivers_account.unwrap_or_else(|| self.receiver.account.clone()),
        };
        TransferDraft {
            user_id: user_id.unwrap_or(self.user_id),
            payer,
            receiver,
            transfer_value: transfer_value.unwrap_or(self.transfer_value),
            creation_date: Some(creation_date.unwrap_or(self.creation_date)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct TransferDto {
    id: i64,
    user_id: i64,
    payers_name: String,
    payers_bank: String,
    payers_agency: String,
    payers_account: String,
    receivers_name: String,
    receivers_bank: String,
    receivers_agency: String,
    receivers_account: String,
    transfer_value: u32,
    transfer_type: TransferType,
    creation_date: NaiveDateTime,
}

impl From<Transfer> for TransferDto {
    fn from(value: Transfer) -> Self {
        let Transfer {
            id,
            user_id,
            payer,
            receiver,
            transfer_value,
            transfer_type,
            creation_date,
            is_deleted: _,
        } = value;
        Self {
            id: id.get(),
            user_id: user_id.get(),
            payers_name: payer.name,
            payers_bank: payer.bank,
            payers_agency: payer.agency,
            payers_account: payer.account,
            receivers_name: receiver.name,
            receivers_bank: receiver.bank,
            receivers_agency: receiver.agency,
            receivers_account: receiver.account,
            transfer_value,
            transfer_type,
            creation_date,
        }
    }
}
