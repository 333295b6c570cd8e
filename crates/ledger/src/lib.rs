//! Multi-currency account ledger.
//!
//! Pure in-memory domain logic: accounts with per-currency balances and a
//! bounded movement history, plus a thread-safe registry that performs
//! deposits, fee-bearing withdrawals and atomic two-account transfers.
//! No IO, no persistence.

pub mod account;
pub mod catalog;
pub mod config;
pub mod error;
pub mod movement;
pub mod registry;

pub use account::{Account, DEFAULT_HISTORY_CAPACITY};
pub use catalog::{AccountCategory, AccountState, CommissionKind, Currency, MovementKind};
pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use movement::Movement;
pub use registry::AccountRegistry;
