//! Fixed catalogs the ledger looks up but never generates: currencies,
//! commission kinds, movement kinds, account lifecycle states and categories.
//!
//! Each enum implements `Distribution<_> for Standard` so test-data builders
//! can draw values from an explicitly passed RNG (`rng.sample(Standard)`).

use rand::Rng;
use rand::distributions::{Distribution, Standard};
use serde::{Deserialize, Serialize};

/// Closed set of supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
    Jpy,
    Chf,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Eur,
        Currency::Usd,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Chf,
    ];

    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Chf => "CHF",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Currency::Eur => "Euro",
            Currency::Usd => "US Dollar",
            Currency::Gbp => "Pound Sterling",
            Currency::Jpy => "Japanese Yen",
            Currency::Chf => "Swiss Franc",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Chf => "Fr",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// Commission schedule, expressed in basis points (100 bp = 1%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionKind {
    None,
    SameBankTransfer,
    InterBankTransfer,
    CurrencyExchangeFee,
    AccountMaintenance,
    ExternalAtmWithdrawal,
}

impl CommissionKind {
    pub const ALL: [CommissionKind; 6] = [
        CommissionKind::None,
        CommissionKind::SameBankTransfer,
        CommissionKind::InterBankTransfer,
        CommissionKind::CurrencyExchangeFee,
        CommissionKind::AccountMaintenance,
        CommissionKind::ExternalAtmWithdrawal,
    ];

    pub fn basis_points(self) -> u32 {
        match self {
            CommissionKind::None => 0,
            CommissionKind::SameBankTransfer => 0,
            CommissionKind::InterBankTransfer => 50,
            CommissionKind::CurrencyExchangeFee => 75,
            CommissionKind::AccountMaintenance => 200,
            CommissionKind::ExternalAtmWithdrawal => 100,
        }
    }

    /// Fee for `amount` minor units: `floor(amount * bp / 10000)`.
    ///
    /// Computed in `i128`; the result never exceeds `amount` because no kind
    /// charges more than 10000 bp, so it always fits back into `i64`.
    /// Non-positive amounts carry no fee.
    pub fn fee(self, amount: i64) -> i64 {
        if amount <= 0 {
            return 0;
        }
        let fee = (amount as i128 * self.basis_points() as i128) / 10_000;
        fee as i64
    }
}

/// Kind of balance-affecting event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Deposit,
    Withdrawal,
    TransferOut,
    TransferIn,
    /// Named in the catalog only; no operation builds it (no rate logic exists).
    CurrencyExchange,
    Fee,
}

impl MovementKind {
    pub const ALL: [MovementKind; 6] = [
        MovementKind::Deposit,
        MovementKind::Withdrawal,
        MovementKind::TransferOut,
        MovementKind::TransferIn,
        MovementKind::CurrencyExchange,
        MovementKind::Fee,
    ];

    /// Fixed debit/credit classification, independent of amount sign.
    pub fn is_debit(self) -> bool {
        match self {
            MovementKind::Withdrawal | MovementKind::TransferOut | MovementKind::Fee => true,
            MovementKind::Deposit | MovementKind::TransferIn | MovementKind::CurrencyExchange => {
                false
            }
        }
    }

    /// Declared daily cap in minor units (`None` = no specific limit).
    ///
    /// Metadata only: no ledger operation enforces it.
    pub fn daily_limit(self) -> Option<i64> {
        match self {
            MovementKind::Withdrawal => Some(6_000_000),
            MovementKind::TransferOut => Some(30_000_000),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            MovementKind::Deposit => "DEPOSIT",
            MovementKind::Withdrawal => "WITHDRAWAL",
            MovementKind::TransferOut => "TRANSFER_OUT",
            MovementKind::TransferIn => "TRANSFER_IN",
            MovementKind::CurrencyExchange => "CURRENCY_EXCHANGE",
            MovementKind::Fee => "FEE",
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Account lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountState {
    PendingActivation,
    Active,
    Blocked,
    Cancelled,
}

impl AccountState {
    pub const ALL: [AccountState; 4] = [
        AccountState::PendingActivation,
        AccountState::Active,
        AccountState::Blocked,
        AccountState::Cancelled,
    ];
}

impl core::fmt::Display for AccountState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            AccountState::PendingActivation => "PENDING_ACTIVATION",
            AccountState::Active => "ACTIVE",
            AccountState::Blocked => "BLOCKED",
            AccountState::Cancelled => "CANCELLED",
        };
        f.write_str(label)
    }
}

/// Account product category (immutable for the account's lifetime).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    Current,
    Savings,
    Payroll,
    Business,
}

impl AccountCategory {
    pub const ALL: [AccountCategory; 4] = [
        AccountCategory::Current,
        AccountCategory::Savings,
        AccountCategory::Payroll,
        AccountCategory::Business,
    ];
}

impl core::fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            AccountCategory::Current => "CURRENT",
            AccountCategory::Savings => "SAVINGS",
            AccountCategory::Payroll => "PAYROLL",
            AccountCategory::Business => "BUSINESS",
        };
        f.write_str(label)
    }
}

macro_rules! impl_uniform_pick {
    ($t:ty) => {
        impl Distribution<$t> for Standard {
            fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> $t {
                let all = <$t>::ALL;
                all[rng.gen_range(0..all.len())]
            }
        }
    };
}

impl_uniform_pick!(Currency);
impl_uniform_pick!(CommissionKind);
impl_uniform_pick!(MovementKind);
impl_uniform_pick!(AccountState);
impl_uniform_pick!(AccountCategory);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn fee_table_matches_basis_points() {
        assert_eq!(CommissionKind::None.fee(10_000), 0);
        assert_eq!(CommissionKind::SameBankTransfer.fee(10_000), 0);
        assert_eq!(CommissionKind::InterBankTransfer.fee(10_000), 50);
        assert_eq!(CommissionKind::CurrencyExchangeFee.fee(10_000), 75);
        assert_eq!(CommissionKind::AccountMaintenance.fee(10_000), 200);
        assert_eq!(CommissionKind::ExternalAtmWithdrawal.fee(10_000), 100);
    }

    #[test]
    fn fee_rounds_down() {
        // 199 * 50 / 10000 = 0.995
        assert_eq!(CommissionKind::InterBankTransfer.fee(199), 0);
        // 5000 * 50 / 10000 = 25
        assert_eq!(CommissionKind::InterBankTransfer.fee(5_000), 25);
        // 333 * 75 / 10000 = 2.4975
        assert_eq!(CommissionKind::CurrencyExchangeFee.fee(333), 2);
    }

    #[test]
    fn fee_does_not_overflow_on_large_amounts() {
        let fee = CommissionKind::AccountMaintenance.fee(i64::MAX);
        assert_eq!(fee, ((i64::MAX as i128 * 200) / 10_000) as i64);
    }

    #[test]
    fn debit_classification_is_fixed() {
        let debits: Vec<_> = MovementKind::ALL.iter().filter(|k| k.is_debit()).collect();
        assert_eq!(
            debits,
            vec![
                &MovementKind::Withdrawal,
                &MovementKind::TransferOut,
                &MovementKind::Fee
            ]
        );
        assert!(!MovementKind::CurrencyExchange.is_debit());
    }

    #[test]
    fn daily_limits_are_declared_for_outgoing_kinds_only() {
        assert_eq!(MovementKind::Withdrawal.daily_limit(), Some(6_000_000));
        assert_eq!(MovementKind::TransferOut.daily_limit(), Some(30_000_000));
        assert_eq!(MovementKind::Deposit.daily_limit(), None);
        assert_eq!(MovementKind::Fee.daily_limit(), None);
    }

    #[test]
    fn currency_metadata() {
        assert_eq!(Currency::Eur.symbol(), "€");
        assert_eq!(Currency::Eur.name(), "Euro");
        assert_eq!(Currency::Jpy.name(), "Japanese Yen");
        assert_eq!(Currency::Chf.code(), "CHF");
        assert_eq!(Currency::Gbp.to_string(), "GBP");
        assert_eq!(serde_json::to_string(&Currency::Jpy).unwrap(), "\"JPY\"");
    }

    #[test]
    fn seeded_rng_eventually_draws_every_currency() {
        let mut rng = StdRng::seed_from_u64(1);
        let drawn: HashSet<Currency> = (0..200).map(|_| rng.sample(Standard)).collect();
        assert_eq!(drawn.len(), Currency::ALL.len());
    }

    #[test]
    fn picks_are_reproducible_for_a_seed() {
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..16)
                .map(|_| rng.sample::<CommissionKind, _>(Standard))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(9), draw(9));
    }
}
