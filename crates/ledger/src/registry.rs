//! Account directory and money-movement orchestrator.
//!
//! Locking model:
//! - the identifier map sits behind an `RwLock`; account creation takes the
//!   write guard so the duplicate check and the insert are one step
//! - every account sits behind its own `Mutex`; validation and mutation of an
//!   account happen under the same guard
//! - transfers take both account guards in ascending `AccountId` order
//!
//! The map guard is always released before an account guard is taken.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use chrono::Utc;

use multiledger_core::{AccountId, DomainError, DomainResult};

use crate::account::Account;
use crate::catalog::{AccountCategory, CommissionKind, Currency, MovementKind};
use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::movement::Movement;

type AccountHandle = Arc<Mutex<Account>>;

/// Thread-safe directory of accounts keyed by identifier.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: RwLock<HashMap<AccountId, AccountHandle>>,
    config: LedgerConfig,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LedgerConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            accounts: RwLock::new(HashMap::new()),
            config,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Create a `PendingActivation` account; rejects an identifier already in use.
    ///
    /// Returns a copy of the freshly created account.
    pub fn create_account(
        &self,
        id: AccountId,
        holder: &str,
        category: AccountCategory,
    ) -> LedgerResult<Account> {
        let account = Account::with_history_capacity(
            id.clone(),
            holder,
            category,
            self.config.history_capacity,
        )?;

        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| LedgerError::LockPoisoned("registry"))?;

        match accounts.entry(id) {
            Entry::Occupied(entry) => {
                tracing::warn!(
                    account_id = %entry.key(),
                    "account creation rejected: duplicate id"
                );
                Err(LedgerError::DuplicateAccount(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                tracing::info!(
                    account_id = %entry.key(),
                    category = %category,
                    "account created"
                );
                entry.insert(Arc::new(Mutex::new(account.clone())));
                Ok(account)
            }
        }
    }

    /// Point-in-time copy of the account, if it exists.
    pub fn lookup(&self, id: &AccountId) -> Option<Account> {
        let handle = self.handle(id).ok()?;
        let account = handle.lock().ok()?;
        Some(account.clone())
    }

    pub fn len(&self) -> usize {
        self.accounts.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies of every account, ordered by identifier.
    ///
    /// Each copy is consistent on its own; the list as a whole is not a
    /// cross-account snapshot.
    pub fn accounts(&self) -> Vec<Account> {
        let handles: Vec<AccountHandle> = match self.accounts.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => return vec![],
        };

        let mut accounts: Vec<Account> = handles
            .iter()
            .filter_map(|h| h.lock().ok().map(|a| a.clone()))
            .collect();
        accounts.sort_by(|a, b| a.id_typed().cmp(b.id_typed()));
        accounts
    }

    pub fn activate(&self, id: &AccountId) -> LedgerResult<()> {
        self.with_account(id, "activate", Account::activate)
    }

    pub fn block(&self, id: &AccountId) -> LedgerResult<()> {
        self.with_account(id, "block", Account::block)
    }

    pub fn cancel(&self, id: &AccountId) -> LedgerResult<()> {
        self.with_account(id, "cancel", Account::cancel)
    }

    /// Credit `amount` to an active account. Deposits never carry a fee.
    pub fn deposit(
        &self,
        id: &AccountId,
        amount: i64,
        currency: Currency,
        description: &str,
    ) -> LedgerResult<()> {
        self.try_deposit(id, amount, currency, description)
            .inspect(|_| {
                tracing::info!(account_id = %id, amount, currency = %currency, "deposit applied");
            })
            .inspect_err(|e| {
                tracing::warn!(
                    account_id = %id,
                    amount,
                    currency = %currency,
                    error = %e,
                    "deposit rejected"
                );
            })
    }

    /// Debit `amount` plus the commission fee from an active account.
    pub fn withdraw(
        &self,
        id: &AccountId,
        amount: i64,
        currency: Currency,
        description: &str,
        commission: CommissionKind,
    ) -> LedgerResult<()> {
        self.try_withdraw(id, amount, currency, description, commission)
            .inspect(|fee| {
                tracing::info!(
                    account_id = %id,
                    amount,
                    fee,
                    currency = %currency,
                    "withdrawal applied"
                );
            })
            .inspect_err(|e| {
                tracing::warn!(
                    account_id = %id,
                    amount,
                    currency = %currency,
                    error = %e,
                    "withdrawal rejected"
                );
            })
            .map(|_| ())
    }

    /// Move `amount` between two active accounts as one transaction.
    ///
    /// The source pays `amount + fee`; the destination receives exactly `amount`.
    pub fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: i64,
        currency: Currency,
        description: &str,
        commission: CommissionKind,
    ) -> LedgerResult<()> {
        self.try_transfer(from, to, amount, currency, description, commission)
            .inspect(|fee| {
                tracing::info!(
                    from = %from,
                    to = %to,
                    amount,
                    fee,
                    currency = %currency,
                    "transfer applied"
                );
            })
            .inspect_err(|e| {
                tracing::warn!(
                    from = %from,
                    to = %to,
                    amount,
                    currency = %currency,
                    error = %e,
                    "transfer rejected"
                );
            })
            .map(|_| ())
    }

    fn try_deposit(
        &self,
        id: &AccountId,
        amount: i64,
        currency: Currency,
        description: &str,
    ) -> LedgerResult<()> {
        ensure_positive(amount)?;
        let handle = self.handle(id)?;
        let mut account = lock(&handle)?;

        ensure_active(&account)?;

        let movement = Movement::new(
            Utc::now(),
            MovementKind::Deposit,
            amount,
            currency,
            description,
            0,
        )?;
        account.apply_movement(movement)
    }

    /// Returns the fee charged.
    fn try_withdraw(
        &self,
        id: &AccountId,
        amount: i64,
        currency: Currency,
        description: &str,
        commission: CommissionKind,
    ) -> LedgerResult<i64> {
        ensure_positive(amount)?;
        let fee = commission.fee(amount);
        let required = amount
            .checked_add(fee)
            .ok_or(LedgerError::AmountOverflow { amount, fee })?;

        let handle = self.handle(id)?;
        let mut account = lock(&handle)?;

        ensure_active(&account)?;
        self.ensure_funds(&account, required, currency)?;

        let movement = Movement::new(
            Utc::now(),
            MovementKind::Withdrawal,
            amount,
            currency,
            description,
            fee,
        )?;
        account.apply_movement(movement)?;
        Ok(fee)
    }

    /// Returns the fee charged to the source.
    fn try_transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: i64,
        currency: Currency,
        description: &str,
        commission: CommissionKind,
    ) -> LedgerResult<i64> {
        if from == to {
            return Err(LedgerError::SameAccount(from.clone()));
        }
        ensure_positive(amount)?;
        if description.trim().is_empty() {
            return Err(DomainError::validation("description cannot be empty").into());
        }
        let fee = commission.fee(amount);
        let required = amount
            .checked_add(fee)
            .ok_or(LedgerError::AmountOverflow { amount, fee })?;

        let source_handle = self.handle(from)?;
        let destination_handle = self.handle(to)?;

        // Canonical order: lower id first, whichever side it is on.
        let source_first = from < to;
        let first = if source_first { from } else { to };
        tracing::debug!(first = %first, "acquiring transfer locks");
        let (mut source, mut destination) = if source_first {
            let s = lock(&source_handle)?;
            let d = lock(&destination_handle)?;
            (s, d)
        } else {
            let d = lock(&destination_handle)?;
            let s = lock(&source_handle)?;
            (s, d)
        };

        ensure_active(&source)?;
        ensure_active(&destination)?;
        self.ensure_funds(&source, required, currency)?;

        let now = Utc::now();
        let outgoing = Movement::new(
            now,
            MovementKind::TransferOut,
            amount,
            currency,
            format!("{description} (transfer to {})", destination.holder()),
            fee,
        )?;
        let incoming = Movement::new(
            now,
            MovementKind::TransferIn,
            amount,
            currency,
            format!("{description} (transfer from {})", source.holder()),
            0,
        )?;

        // Both sides are checked before either is touched.
        for (account, movement) in [(&source, &outgoing), (&destination, &incoming)] {
            if account.balance_after(movement).is_none() {
                return Err(LedgerError::BalanceOverflow {
                    id: account.id_typed().clone(),
                    currency,
                });
            }
        }

        source.apply_movement(outgoing)?;
        destination.apply_movement(incoming)?;
        Ok(fee)
    }

    fn handle(&self, id: &AccountId) -> LedgerResult<AccountHandle> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| LedgerError::LockPoisoned("registry"))?;
        accounts
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(id.clone()))
    }

    fn with_account(
        &self,
        id: &AccountId,
        action: &'static str,
        op: impl FnOnce(&mut Account) -> LedgerResult<()>,
    ) -> LedgerResult<()> {
        let result = self.handle(id).and_then(|handle| {
            let mut account = lock(&handle)?;
            op(&mut account)?;
            Ok(account.state())
        });

        match result {
            Ok(state) => {
                tracing::info!(account_id = %id, action, state = %state, "account state changed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    account_id = %id,
                    action,
                    error = %e,
                    "account state change rejected"
                );
                Err(e)
            }
        }
    }

    /// `required` must leave at least `minimum_balance` behind.
    fn ensure_funds(
        &self,
        account: &Account,
        required: i64,
        currency: Currency,
    ) -> LedgerResult<()> {
        let threshold = required.saturating_add(self.config.minimum_balance);
        if !account.has_sufficient_balance(threshold, currency) {
            return Err(LedgerError::InsufficientFunds {
                id: account.id_typed().clone(),
                currency,
                balance: account.balance(currency),
                required: threshold,
            });
        }
        Ok(())
    }
}

impl core::fmt::Display for AccountRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut ids: Vec<AccountId> = match self.accounts.read() {
            Ok(map) => map.keys().cloned().collect(),
            Err(_) => return f.write_str("AccountRegistry[unavailable]"),
        };
        ids.sort();

        write!(f, "AccountRegistry[{} accounts", ids.len())?;
        if !ids.is_empty() {
            f.write_str(": ")?;
            for (i, id) in ids.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(&id.abbreviated())?;
            }
        }
        f.write_str("]")
    }
}

fn lock(handle: &AccountHandle) -> LedgerResult<MutexGuard<'_, Account>> {
    handle
        .lock()
        .map_err(|_| LedgerError::LockPoisoned("account"))
}

fn ensure_positive(amount: i64) -> LedgerResult<()> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

fn ensure_active(account: &Account) -> LedgerResult<()> {
    if !account.is_active() {
        return Err(LedgerError::AccountNotActive {
            id: account.id_typed().clone(),
            state: account.state(),
        });
    }
    Ok(())
}
