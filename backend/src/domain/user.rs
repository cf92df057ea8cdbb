//! User data model.
//!
//! Users are the registered account holders that transfers hang off. They
//! carry a display name and a CNPJ registry number; neither is checked beyond
//! its length.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum allowed length for a user name, in characters.
pub const USER_NAME_MAX: usize = 128;
/// Maximum allowed length for a CNPJ, in characters.
pub const CNPJ_MAX: usize = 14;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    NameTooLong { max: usize },
    CnpjTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::CnpjTooLong { max } => write!(f, "cnpj must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw store identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human readable user name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: USER_NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Brazilian legal-entity registry number. Only the length is enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cnpj(String);

impl Cnpj {
    /// Validate and construct a [`Cnpj`].
    pub fn new(cnpj: impl Into<String>) -> Result<Self, UserValidationError> {
        let cnpj = cnpj.into();
        if cnpj.chars().count() > CNPJ_MAX {
            return Err(UserValidationError::CnpjTooLong { max: CNPJ_MAX });
        }
        Ok(Self(cnpj))
    }
}

impl AsRef<str> for Cnpj {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Cnpj> for String {
    fn from(value: Cnpj) -> Self {
        value.0
    }
}

impl TryFrom<String> for Cnpj {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Writable user fields, used both for creation and full replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub name: UserName,
    pub cnpj: Cnpj,
}

impl UserProfile {
    /// Validate raw strings into a profile.
    ///
    /// # Examples
    /// ```
    /// use transfer_ledger::domain::UserProfile;
    ///
    /// let profile = UserProfile::try_from_strings("Acme", "12345678000199").expect("valid");
    /// assert_eq!(profile.cnpj.as_ref(), "12345678000199");
    /// assert!(UserProfile::try_from_strings("Acme", "123456780001990").is_err());
    /// ```
    pub fn try_from_strings(
        name: impl Into<String>,
        cnpj: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            cnpj: Cnpj::new(cnpj)?,
        })
    }
}

/// Registered user.
///
/// Serialises as `{"id": .., "name": .., "cnpj": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    id: UserId,
    name: UserName,
    cnpj: Cnpj,
}

impl User {
    /// Build a [`User`] from a store identifier and a validated profile.
    pub fn new(id: UserId, profile: UserProfile) -> Self {
        let UserProfile { name, cnpj } = profile;
        Self { id, name, cnpj }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Registry number.
    pub fn cnpj(&self) -> &Cnpj {
        &self.cnpj
    }
}
