//! Ledger configuration (environment-driven, with defaults).

use serde::{Deserialize, Serialize};

use multiledger_core::{DomainError, DomainResult};

use crate::account::DEFAULT_HISTORY_CAPACITY;

pub const HISTORY_CAPACITY_ENV: &str = "LEDGER_HISTORY_CAPACITY";
pub const MINIMUM_BALANCE_ENV: &str = "LEDGER_MINIMUM_BALANCE";

/// Tunables applied by `AccountRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Movements retained per account before oldest-first eviction.
    pub history_capacity: usize,
    /// Lowest balance (minor units) a withdrawal or transfer may leave behind.
    pub minimum_balance: i64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            minimum_balance: 0,
        }
    }
}

impl LedgerConfig {
    pub fn with_history_capacity(mut self, history_capacity: usize) -> Self {
        self.history_capacity = history_capacity;
        self
    }

    pub fn with_minimum_balance(mut self, minimum_balance: i64) -> Self {
        self.minimum_balance = minimum_balance;
        self
    }

    /// Read overrides from `LEDGER_HISTORY_CAPACITY` / `LEDGER_MINIMUM_BALANCE`.
    ///
    /// Unset variables keep their defaults; set-but-invalid ones are errors.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(HISTORY_CAPACITY_ENV) {
            config.history_capacity = raw.trim().parse().map_err(|e| {
                DomainError::validation(format!("{HISTORY_CAPACITY_ENV}='{raw}': {e}"))
            })?;
        }
        if let Some(raw) = lookup(MINIMUM_BALANCE_ENV) {
            config.minimum_balance = raw.trim().parse().map_err(|e| {
                DomainError::validation(format!("{MINIMUM_BALANCE_ENV}='{raw}': {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.history_capacity == 0 {
            return Err(DomainError::validation("history capacity must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = LedgerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.history_capacity, 1000);
        assert_eq!(config.minimum_balance, 0);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = LedgerConfig::from_lookup(lookup_from(&[
            (HISTORY_CAPACITY_ENV, " 50 "),
            (MINIMUM_BALANCE_ENV, "-2500"),
        ]))
        .unwrap();
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.minimum_balance, -2_500);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_number = LedgerConfig::from_lookup(lookup_from(&[(HISTORY_CAPACITY_ENV, "lots")]));
        assert!(matches!(bad_number, Err(DomainError::Validation(_))));

        let zero = LedgerConfig::from_lookup(lookup_from(&[(HISTORY_CAPACITY_ENV, "0")]));
        assert!(matches!(zero, Err(DomainError::Validation(_))));
    }

    #[test]
    fn builder_setters_chain() {
        let config = LedgerConfig::default()
            .with_history_capacity(3)
            .with_minimum_balance(100);
        assert_eq!(config.history_capacity, 3);
        assert_eq!(config.minimum_balance, 100);
        assert!(config.validate().is_ok());
    }
}
