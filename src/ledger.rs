//! Balances and total supply.
//!
//! Maintains the invariant `sum(balances) == total_supply` after every
//! operation. Every balance mutation is reported to a [`BalanceHook`] before
//! the method returns.

use crate::account::AccountId;
use crate::error::{LedgerError, Result};
use std::collections::HashMap;

/// Observer of balance mutations.
///
/// Called synchronously for every credit and debit, with the delta applied.
pub trait BalanceHook {
    fn balance_increased(&mut self, account: &AccountId, delta: u128);
    fn balance_decreased(&mut self, account: &AccountId, delta: u128);
}

/// Token balances keyed by account.
#[derive(Debug, Default)]
pub struct Ledger {
    balances: HashMap<AccountId, u128>,
    total_supply: u128,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Current balance of `account`; zero if never touched.
    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Every account the ledger has ever credited or debited.
    pub fn accounts(&self) -> impl Iterator<Item = &AccountId> {
        self.balances.keys()
    }

    /// Creates `amount` new units for `account`.
    ///
    /// Fails with `InvalidAmount` for zero and `Overflow` if supply would wrap.
    pub fn mint<H: BalanceHook>(
        &mut self,
        hook: &mut H,
        account: &AccountId,
        amount: u128,
    ) -> Result<()> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("total supply"))?;

        self.total_supply = total_supply;
        self.credit(hook, account, amount);
        Ok(())
    }

    /// Destroys the whole balance of `account` and returns the amount burnt.
    pub fn burn_all<H: BalanceHook>(&mut self, hook: &mut H, account: &AccountId) -> Result<u128> {
        let amount = self.balance_of(account);
        if amount == 0 {
            return Err(LedgerError::InsufficientBalance {
                needed: 1,
                available: 0,
            });
        }

        self.debit(hook, account, amount);
        self.total_supply -= amount;
        Ok(amount)
    }

    /// Puts back a balance removed by [`Ledger::burn_all`] when the
    /// surrounding operation is rolled back.
    pub(crate) fn restore_burnt<H: BalanceHook>(
        &mut self,
        hook: &mut H,
        account: &AccountId,
        amount: u128,
    ) {
        self.total_supply += amount;
        self.credit(hook, account, amount);
    }

    /// Moves `amount` from `from` to `to`. A zero amount is accepted.
    pub fn transfer<H: BalanceHook>(
        &mut self,
        hook: &mut H,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<()> {
        self.ensure_balance(from, amount)?;

        self.debit(hook, from, amount);
        self.credit(hook, to, amount);
        Ok(())
    }

    /// Fails with `InsufficientBalance` unless `account` holds at least `amount`.
    pub fn ensure_balance(&self, account: &AccountId, amount: u128) -> Result<()> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    fn credit<H: BalanceHook>(&mut self, hook: &mut H, account: &AccountId, amount: u128) {
        *self.balances.entry(account.clone()).or_insert(0) += amount;
        hook.balance_increased(account, amount);
    }

    fn debit<H: BalanceHook>(&mut self, hook: &mut H, account: &AccountId, amount: u128) {
        *self.balances.entry(account.clone()).or_insert(0) -= amount;
        hook.balance_decreased(account, amount);
    }

    /// Verifies the invariant: `total_supply == sum(balances)`.
    pub fn check_invariant(&self) -> bool {
        self.balances
            .values()
            .try_fold(0u128, |acc, b| acc.checked_add(*b))
            == Some(self.total_supply)
    }
}
