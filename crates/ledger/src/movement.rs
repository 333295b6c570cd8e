use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use multiledger_core::{DomainError, DomainResult, ValueObject};

use crate::catalog::{Currency, MovementKind};

/// One balance-affecting event (immutable).
///
/// Amounts are in minor units (e.g. cents). Fields are private and there is no
/// `Deserialize` impl, so every `Movement` in existence went through `new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movement {
    occurred_at: DateTime<Utc>,
    kind: MovementKind,
    amount: i64,
    currency: Currency,
    description: String,
    fee: i64,
}

impl ValueObject for Movement {}

impl Movement {
    pub fn new(
        occurred_at: DateTime<Utc>,
        kind: MovementKind,
        amount: i64,
        currency: Currency,
        description: impl Into<String>,
        fee: i64,
    ) -> DomainResult<Self> {
        let description = description.into();

        if amount <= 0 {
            return Err(DomainError::validation("amount must be positive"));
        }
        if fee < 0 {
            return Err(DomainError::validation("fee cannot be negative"));
        }
        if amount.checked_add(fee).is_none() {
            return Err(DomainError::validation("amount plus fee overflows"));
        }
        if description.trim().is_empty() {
            return Err(DomainError::validation("description cannot be empty"));
        }

        Ok(Self {
            occurred_at,
            kind,
            amount,
            currency,
            description,
            fee,
        })
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn fee(&self) -> i64 {
        self.fee
    }

    /// `amount + fee` (cannot overflow; checked at construction).
    pub fn total_amount(&self) -> i64 {
        self.amount + self.fee
    }

    pub fn is_debit(&self) -> bool {
        self.kind.is_debit()
    }

    /// Signed effect on the balance of `currency()`.
    ///
    /// Debits carry the fee; credits never do.
    pub fn balance_delta(&self) -> i64 {
        if self.is_debit() {
            -self.total_amount()
        } else {
            self.amount
        }
    }
}

/// `1234` minor units -> `12.34`.
fn format_minor_units(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

impl core::fmt::Display for Movement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let symbol = self.currency.symbol();
        write!(
            f,
            "{}: {} {symbol}",
            self.kind,
            format_minor_units(self.amount)
        )?;
        if self.fee > 0 {
            write!(f, " (fee: {} {symbol})", format_minor_units(self.fee))?;
        }
        write!(
            f,
            " - {}",
            self.occurred_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}
