//! Transfer listing filters addressed by `/transfer/filter/{type}/{value}`.

use chrono::NaiveDate;

use super::Transfer;

/// Format of the value accepted by the `date` filter.
pub const FILTER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Criterion used to narrow the active transfer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferFilter {
    /// Transfers created on this calendar day.
    Date(NaiveDate),
    /// Transfers whose payer name matches exactly.
    Payer(String),
    /// Transfers whose receiver name matches exactly.
    Receiver(String),
}

/// Errors raised while parsing a filter from its path segments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferFilterError {
    #[error("unknown filter type '{kind}'; expected date, payer or receiver")]
    UnknownKind { kind: String },
    #[error("date filter '{value}' must use the YYYY-MM-DD format")]
    InvalidDate { value: String },
}

impl TransferFilter {
    /// Build a filter from its kind and raw value.
    ///
    /// # Examples
    /// ```
    /// use transfer_ledger::domain::TransferFilter;
    ///
    /// let filter = TransferFilter::parse("payer", "Acme").expect("known kind");
    /// assert_eq!(filter, TransferFilter::Payer("Acme".into()));
    /// assert!(TransferFilter::parse("amount", "10").is_err());
    /// ```
    pub fn parse(kind: &str, value: &str) -> Result<Self, TransferFilterError> {
        match kind {
            "date" => NaiveDate::parse_from_str(value, FILTER_DATE_FORMAT)
                .map(Self::Date)
                .map_err(|_| TransferFilterError::InvalidDate {
                    value: value.to_owned(),
                }),
            "payer" => Ok(Self::Payer(value.to_owned())),
            "receiver" => Ok(Self::Receiver(value.to_owned())),
            other => Err(TransferFilterError::UnknownKind {
                kind: other.to_owned(),
            }),
        }
    }

    /// Whether `transfer` satisfies the filter. Deletion state is not
    /// considered here.
    pub fn matches(&self, transfer: &Transfer) -> bool {
        match self {
            Self::Date(day) => transfer.creation_date().date() == *day,
            Self::Payer(name) => transfer.payer().name == *name,
            Self::Receiver(name) => transfer.receiver().name == *name,
        }
    }
}
