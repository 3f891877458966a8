//! ISO 4217 currency codes with parse-time validation.
//!
//! Companies may operate in any ISO currency, so this is an open newtype
//! rather than a closed enum: any three-letter uppercase ASCII code is
//! accepted, and invalid codes are rejected when parsed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an invalid currency code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid currency code: {0:?} (expected 3 uppercase ASCII letters)")]
pub struct CurrencyCodeError(pub String);

/// An ISO 4217 alphabetic currency code (e.g. "USD", "EUR", "IDR").
///
/// Always exactly three uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses a currency code, accepting lowercase input.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyCodeError` if the code is not three ASCII letters.
    pub fn parse(code: &str) -> Result<Self, CurrencyCodeError> {
        let code = code.trim().to_ascii_uppercase();
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(CurrencyCodeError(code))
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}
