//! Transfer classification and pre-save validation.
//!
//! Every save goes through [`TransferDraft::prepare`]: the value ceiling is
//! enforced, a missing creation date is stamped from the clock and the
//! settlement type is derived from the remaining fields.

use chrono::{NaiveDateTime, Timelike};
use mockable::Clock;

use super::{NewTransfer, TransferDraft, TransferType, TransferValidationError};

/// Largest value a transfer may carry. The bound is inclusive.
pub const MAX_TRANSFER_VALUE: u32 = 100_000;

/// Values strictly below this qualify for TED inside the business window.
pub const TED_VALUE_LIMIT: u32 = 5_000;

/// Wire format accepted for `creation_date`.
pub const CREATION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// TED window: hour strictly greater than OPENS_AFTER and strictly less than
// CLOSES_AT, i.e. 11:00:00 through 15:59:59.
const TED_WINDOW_OPENS_AFTER: u32 = 10;
const TED_WINDOW_CLOSES_AT: u32 = 16;

/// Reject values above [`MAX_TRANSFER_VALUE`].
///
/// # Examples
/// ```
/// use transfer_ledger::domain::transfer::{validate_transfer_value, MAX_TRANSFER_VALUE};
///
/// assert!(validate_transfer_value(MAX_TRANSFER_VALUE).is_ok());
/// assert!(validate_transfer_value(MAX_TRANSFER_VALUE + 1).is_err());
/// ```
pub fn validate_transfer_value(value: u32) -> Result<(), TransferValidationError> {
    if value > MAX_TRANSFER_VALUE {
        return Err(TransferValidationError::ValueTooLarge {
            max: MAX_TRANSFER_VALUE,
            actual: value,
        });
    }
    Ok(())
}

/// Derive the settlement type.
///
/// Same bank on both sides is always `CC`. Otherwise a value below
/// [`TED_VALUE_LIMIT`] created between 11:00 and 15:59 is `TED`; anything
/// else is `DOC`. Bank names are compared exactly.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use transfer_ledger::domain::transfer::{classify, TransferType};
///
/// let noon = NaiveDate::from_ymd_opt(2019, 1, 1)
///     .and_then(|d| d.and_hms_opt(12, 0, 0))
///     .expect("valid timestamp");
/// assert_eq!(classify("X", "X", 99_999, noon), TransferType::Cc);
/// assert_eq!(classify("X", "Y", 100, noon), TransferType::Ted);
/// assert_eq!(classify("X", "Y", 5_000, noon), TransferType::Doc);
/// ```
pub fn classify(
    payers_bank: &str,
    receivers_bank: &str,
    transfer_value: u32,
    creation_date: NaiveDateTime,
) -> TransferType {
    if payers_bank == receivers_bank {
        return TransferType::Cc;
    }
    let hour = creation_date.hour();
    let in_window = hour > TED_WINDOW_OPENS_AFTER && hour < TED_WINDOW_CLOSES_AT;
    if transfer_value < TED_VALUE_LIMIT && in_window {
        TransferType::Ted
    } else {
        TransferType::Doc
    }
}

/// Parse a client-supplied `creation_date` in [`CREATION_DATE_FORMAT`].
///
/// Fractional seconds, offsets and trailing text are rejected.
pub fn parse_creation_date(raw: &str) -> Result<NaiveDateTime, TransferValidationError> {
    NaiveDateTime::parse_from_str(raw, CREATION_DATE_FORMAT).map_err(|_| {
        TransferValidationError::InvalidCreationDate {
            value: raw.to_owned(),
        }
    })
}

// Stored timestamps carry no sub-second part so they render in
// CREATION_DATE_FORMAT.
fn whole_seconds(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(0).unwrap_or(at)
}

impl TransferDraft {
    /// Validate the draft and classify it for persistence.
    ///
    /// A missing creation date is taken from `clock` in local time,
    /// truncated to whole seconds.
    pub fn prepare(self, clock: &dyn Clock) -> Result<NewTransfer, TransferValidationError> {
        validate_transfer_value(self.transfer_value)?;
        self.validate_parties()?;

        let TransferDraft {
            user_id,
            payer,
            receiver,
            transfer_value,
            creation_date,
        } = self;
        let creation_date =
            creation_date.unwrap_or_else(|| whole_seconds(clock.local().naive_local()));
        let transfer_type = classify(&payer.bank, &receiver.bank, transfer_value, creation_date);

        Ok(NewTransfer {
            user_id,
            payer,
            receiver,
            transfer_value,
            transfer_type,
            creation_date,
        })
    }
}
