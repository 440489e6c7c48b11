//! Delegated spending limits.

use crate::account::AccountId;
use crate::error::{LedgerError, Result};
use std::collections::HashMap;

/// Per-(owner, spender) spend limits.
#[derive(Debug, Default)]
pub struct AllowanceRegistry {
    limits: HashMap<(AccountId, AccountId), u128>,
}

impl AllowanceRegistry {
    pub fn new() -> Self {
        AllowanceRegistry::default()
    }

    /// Overwrites the limit `spender` may move out of `owner`'s balance.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: u128) {
        self.limits.insert((owner.clone(), spender.clone()), amount);
    }

    /// Current limit; zero if never approved.
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.limits
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Fails with `AllowanceExceeded` unless `spender` may move `amount`.
    pub fn ensure_allowance(
        &self,
        owner: &AccountId,
        spender: &AccountId,
        amount: u128,
    ) -> Result<()> {
        let allowed = self.allowance(owner, spender);
        if allowed < amount {
            return Err(LedgerError::AllowanceExceeded {
                needed: amount,
                allowed,
            });
        }
        Ok(())
    }

    /// Reduces the limit by `amount`. Checks the limit first and changes
    /// nothing on failure.
    pub fn consume(&mut self, owner: &AccountId, spender: &AccountId, amount: u128) -> Result<()> {
        self.ensure_allowance(owner, spender, amount)?;
        if let Some(limit) = self.limits.get_mut(&(owner.clone(), spender.clone())) {
            *limit -= amount;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> AccountId {
        AccountId::from(s)
    }

    #[test]
    fn test_approve_overwrites() {
        let mut registry = AllowanceRegistry::new();
        registry.approve(&id("a"), &id("b"), 5);
        assert_eq!(registry.allowance(&id("a"), &id("b")), 5);

        registry.approve(&id("a"), &id("b"), 10);
        assert_eq!(registry.allowance(&id("a"), &id("b")), 10);

        registry.approve(&id("a"), &id("b"), 3);
        assert_eq!(registry.allowance(&id("a"), &id("b")), 3);
    }

    #[test]
    fn test_allowance_is_directional() {
        let mut registry = AllowanceRegistry::new();
        registry.approve(&id("a"), &id("b"), 5);
        assert_eq!(registry.allowance(&id("b"), &id("a")), 0);
    }

    #[test]
    fn test_consume_decrements_and_rejects_excess() {
        let mut registry = AllowanceRegistry::new();
        registry.approve(&id("a"), &id("b"), 10);

        let err = registry.consume(&id("a"), &id("b"), 11).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::AllowanceExceeded {
                needed: 11,
                allowed: 10
            }
        ));
        assert_eq!(registry.allowance(&id("a"), &id("b")), 10);

        registry.consume(&id("a"), &id("b"), 9).unwrap();
        assert_eq!(registry.allowance(&id("a"), &id("b")), 1);
        registry.consume(&id("a"), &id("b"), 1).unwrap();
        assert_eq!(registry.allowance(&id("a"), &id("b")), 0);
    }

    #[test]
    fn test_consume_zero_without_approval() {
        let mut registry = AllowanceRegistry::new();
        registry.consume(&id("a"), &id("b"), 0).unwrap();
        assert_eq!(registry.allowance(&id("a"), &id("b")), 0);
    }
}
