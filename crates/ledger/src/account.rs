use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

use multiledger_core::{AccountId, DomainError, DomainResult, Entity};

use crate::catalog::{AccountCategory, AccountState, Currency};
use crate::error::{LedgerError, LedgerResult};
use crate::movement::Movement;

/// Default number of movements retained in an account's visible history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Bank account: balances per currency, bounded history, lifecycle state.
///
/// Balances always equal the net of every movement ever applied, including
/// movements that have since been evicted from `history`.
///
/// `Account` itself is not synchronized; `AccountRegistry` keeps each one
/// behind its own lock. Values returned by the registry are detached copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: AccountId,
    holder: String,
    category: AccountCategory,
    state: AccountState,
    balances: BTreeMap<Currency, i64>,
    history: VecDeque<Movement>,
    #[serde(skip)]
    history_capacity: usize,
}

impl Account {
    /// New account in `PendingActivation` with no balances or history.
    pub fn new(
        id: AccountId,
        holder: impl Into<String>,
        category: AccountCategory,
    ) -> DomainResult<Self> {
        Self::with_history_capacity(id, holder, category, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_history_capacity(
        id: AccountId,
        holder: impl Into<String>,
        category: AccountCategory,
        history_capacity: usize,
    ) -> DomainResult<Self> {
        let holder = holder.into();
        if holder.trim().is_empty() {
            return Err(DomainError::validation("holder cannot be empty"));
        }
        if history_capacity == 0 {
            return Err(DomainError::validation("history capacity must be at least 1"));
        }

        Ok(Self {
            id,
            holder,
            category,
            state: AccountState::PendingActivation,
            balances: BTreeMap::new(),
            history: VecDeque::with_capacity(history_capacity.min(DEFAULT_HISTORY_CAPACITY)),
            history_capacity,
        })
    }

    pub fn id_typed(&self) -> &AccountId {
        &self.id
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn category(&self) -> AccountCategory {
        self.category
    }

    pub fn state(&self) -> AccountState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == AccountState::Active
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    /// Balance in `currency` (zero when no movement has touched it).
    pub fn balance(&self, currency: Currency) -> i64 {
        self.balances.get(&currency).copied().unwrap_or(0)
    }

    pub fn has_sufficient_balance(&self, amount: i64, currency: Currency) -> bool {
        self.balance(currency) >= amount
    }

    /// Number of movements in the visible history.
    pub fn movement_count(&self) -> usize {
        self.history.len()
    }

    /// Snapshot of every non-default balance.
    pub fn balances(&self) -> BTreeMap<Currency, i64> {
        self.balances.clone()
    }

    /// Snapshot of the visible history, oldest first.
    pub fn history(&self) -> Vec<Movement> {
        self.history.iter().cloned().collect()
    }

    /// Balance `m` would leave behind, or `None` if it does not fit in `i64`.
    pub fn balance_after(&self, m: &Movement) -> Option<i64> {
        self.balance(m.currency()).checked_add(m.balance_delta())
    }

    /// Record a movement: evict the oldest entry if full, append, adjust balance.
    ///
    /// State and funds are checked by `AccountRegistry` before it gets here.
    /// A movement whose resulting balance would not fit in `i64` is rejected
    /// with nothing changed.
    pub(crate) fn apply_movement(&mut self, m: Movement) -> LedgerResult<()> {
        let balance = self
            .balance_after(&m)
            .ok_or_else(|| LedgerError::BalanceOverflow {
                id: self.id.clone(),
                currency: m.currency(),
            })?;

        if self.history.len() >= self.history_capacity {
            self.history.pop_front();
        }
        self.balances.insert(m.currency(), balance);
        self.history.push_back(m);
        Ok(())
    }

    /// `PendingActivation -> Active`.
    pub fn activate(&mut self) -> LedgerResult<()> {
        self.transition("activate", AccountState::Active, |from| {
            from == AccountState::PendingActivation
        })
    }

    /// `Active -> Blocked`.
    pub fn block(&mut self) -> LedgerResult<()> {
        self.transition("block", AccountState::Blocked, |from| {
            from == AccountState::Active
        })
    }

    /// Any state except `Cancelled` -> `Cancelled` (terminal).
    pub fn cancel(&mut self) -> LedgerResult<()> {
        self.transition("cancel", AccountState::Cancelled, |from| {
            from != AccountState::Cancelled
        })
    }

    fn transition(
        &mut self,
        action: &'static str,
        to: AccountState,
        allowed_from: impl Fn(AccountState) -> bool,
    ) -> LedgerResult<()> {
        if !allowed_from(self.state) {
            return Err(LedgerError::InvalidTransition {
                action,
                from: self.state,
            });
        }
        self.state = to;
        Ok(())
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Account[{}, {}, {}, {}",
            self.id.abbreviated(),
            self.holder,
            self.category,
            self.state
        )?;
        if !self.balances.is_empty() {
            f.write_str(", Balances: ")?;
            for (i, (currency, amount)) in self.balances.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{currency}={amount}")?;
            }
        }
        f.write_str("]")
    }
}
