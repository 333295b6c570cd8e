//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a bank account (an IBAN in practice).
///
/// Ordering is lexicographic on the underlying text; the ledger relies on it
/// as the canonical lock order when two accounts are involved in one operation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Number of random digits following the country prefix in a generated IBAN
    /// (2 check digits + 20 account digits).
    const IBAN_DIGITS: usize = 22;

    /// Create an identifier, rejecting blank values and embedded whitespace.
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::invalid_id("AccountId: must not be blank"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::invalid_id(format!(
                "AccountId: '{value}' contains whitespace"
            )));
        }
        Ok(Self(value))
    }

    /// Generate a Spanish-style IBAN (`ES` + 22 digits) from the given source.
    ///
    /// No check-digit validation; intended for synthesizing test data. Pass a
    /// seeded RNG for determinism.
    pub fn generate_iban<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut iban = String::with_capacity(2 + Self::IBAN_DIGITS);
        iban.push_str("ES");
        for _ in 0..Self::IBAN_DIGITS {
            let digit = rng.gen_range(0..10u32);
            iban.push(char::from_digit(digit, 10).unwrap_or('0'));
        }
        Self(iban)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for logs and rendering: first 4 + `...` + last 3 characters.
    pub fn abbreviated(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 7 {
            return self.0.clone();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 3..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for AccountId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl FromStr for AccountId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
