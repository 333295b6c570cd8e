//! Operational outcomes of ledger operations.

use thiserror::Error;

use multiledger_core::{AccountId, DomainError};

use crate::catalog::{AccountState, Currency};

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Reason a ledger operation was not performed.
///
/// Every variant is a non-fatal rejection: when an operation returns one of
/// these, no account it touched has been modified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("amount must be positive (got {0})")]
    InvalidAmount(i64),

    #[error("amount {amount} plus fee {fee} exceeds the balance range")]
    AmountOverflow { amount: i64, fee: i64 },

    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("account {0} already exists")]
    DuplicateAccount(AccountId),

    #[error("account {id} is {state}, expected ACTIVE")]
    AccountNotActive { id: AccountId, state: AccountState },

    #[error(
        "account {id} has insufficient {currency} funds: balance {balance}, required {required}"
    )]
    InsufficientFunds {
        id: AccountId,
        currency: Currency,
        balance: i64,
        required: i64,
    },

    #[error("source and destination are the same account ({0})")]
    SameAccount(AccountId),

    #[error("cannot {action} account in state {from}")]
    InvalidTransition {
        action: &'static str,
        from: AccountState,
    },

    #[error("{currency} balance of account {id} would overflow")]
    BalanceOverflow { id: AccountId, currency: Currency },

    /// A thread panicked while holding an account or registry lock.
    #[error("lock poisoned: {0}")]
    LockPoisoned(&'static str),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
