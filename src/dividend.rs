//! Proportional dividend accounting in constant time.
//!
//! A single global accumulator, `magnified_per_unit`, grows by
//! `amount * MAGNITUDE / total_supply` on every recorded dividend. An
//! account holding `b` units is entitled to `magnified_per_unit * b /
//! MAGNITUDE`, except for the part of the accumulator that built up before
//! it held those units. That part is cancelled by a per-account correction
//! adjusted on every balance change:
//!
//! - balance increases by `d`: `correction -= magnified_per_unit * d`
//! - balance decreases by `d`: `correction += magnified_per_unit * d`
//!
//! so that
//!
//! ```text
//! accumulative(account) = (magnified_per_unit * balance + correction) / MAGNITUDE
//! ```
//!
//! only counts dividends recorded while each unit was actually held. Past
//! entitlement is therefore unaffected by later balance changes, and no
//! operation ever visits other holders.

use crate::account::AccountId;
use crate::error::{LedgerError, Result};
use crate::ledger::BalanceHook;
use crate::magnified::{magnify, Correction, MAGNITUDE};
use log::debug;
use primitive_types::U256;
use std::collections::HashMap;

/// Dividend state of one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DividendEntry {
    /// Cancels entitlement on units the account did not hold at the time.
    pub correction: Correction,

    /// Lifetime amount paid out. Never decreases.
    pub withdrawn: u128,
}

/// Global payout-per-unit accumulator plus per-account corrections.
#[derive(Debug, Default)]
pub struct DividendAccumulator {
    magnified_per_unit: U256,

    /// Sum of all recorded dividends. Bounds every account's entitlement,
    /// which keeps entitlements within `u128`.
    total_recorded: u128,

    entries: HashMap<AccountId, DividendEntry>,
}

impl DividendAccumulator {
    pub fn new() -> Self {
        DividendAccumulator::default()
    }

    /// The scaled cumulative dividend per unit of balance.
    pub fn magnified_per_unit(&self) -> U256 {
        self.magnified_per_unit
    }

    /// Sum of every dividend recorded so far.
    pub fn total_recorded(&self) -> u128 {
        self.total_recorded
    }

    /// Dividend state of `account`; zeroed if never touched.
    pub fn entry(&self, account: &AccountId) -> DividendEntry {
        self.entries.get(account).copied().unwrap_or_default()
    }

    /// Splits `amount` over `total_supply` units.
    ///
    /// The remainder of `amount * MAGNITUDE / total_supply` is forfeited;
    /// the loss is below one base unit per supply unit per call.
    pub fn record(&mut self, amount: u128, total_supply: u128) -> Result<()> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if total_supply == 0 {
            return Err(LedgerError::NoSupply);
        }

        // amount < 2^128 and MAGNITUDE < 2^128, so the product fits in 256 bits.
        let increment = U256::from(amount) * MAGNITUDE / U256::from(total_supply);
        let magnified_per_unit = self
            .magnified_per_unit
            .checked_add(increment)
            .ok_or(LedgerError::Overflow("dividend accumulator"))?;
        let total_recorded = self
            .total_recorded
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("recorded dividends"))?;

        self.magnified_per_unit = magnified_per_unit;
        self.total_recorded = total_recorded;
        debug!(
            "Recorded dividend of {} over supply {}, per-unit now {}",
            amount, total_supply, self.magnified_per_unit
        );
        Ok(())
    }

    /// Everything `account` has earned so far, withdrawn or not.
    pub fn accumulative(&self, account: &AccountId, balance: u128) -> u128 {
        let entry = self.entry(account);
        let magnified = entry
            .correction
            .apply(magnify(self.magnified_per_unit, balance));
        let accumulative = magnified / MAGNITUDE;

        // Bounded by `total_recorded`, so the value fits in the low 128 bits.
        debug_assert!(accumulative <= U256::from(self.total_recorded));
        accumulative.low_u128()
    }

    /// Earned but not yet withdrawn.
    pub fn withdrawable(&self, account: &AccountId, balance: u128) -> u128 {
        let accumulative = self.accumulative(account, balance);
        let withdrawn = self.entry(account).withdrawn;

        debug_assert!(withdrawn <= accumulative);
        accumulative.saturating_sub(withdrawn)
    }

    /// Marks the whole withdrawable amount as paid and returns it.
    ///
    /// The caller releases the value afterwards; zero means there is
    /// nothing to release.
    pub fn claim(&mut self, account: &AccountId, balance: u128) -> u128 {
        let amount = self.withdrawable(account, balance);
        if amount > 0 {
            self.entries.entry(account.clone()).or_default().withdrawn += amount;
        }
        amount
    }

    /// Reverses a [`DividendAccumulator::claim`] whose payout failed.
    pub(crate) fn unclaim(&mut self, account: &AccountId, amount: u128) {
        if let Some(entry) = self.entries.get_mut(account) {
            entry.withdrawn -= amount;
        }
    }
}

impl BalanceHook for DividendAccumulator {
    fn balance_increased(&mut self, account: &AccountId, delta: u128) {
        let shift = magnify(self.magnified_per_unit, delta);
        let entry = self.entries.entry(account.clone()).or_default();
        entry.correction = entry.correction.minus(shift);
    }

    fn balance_decreased(&mut self, account: &AccountId, delta: u128) {
        let shift = magnify(self.magnified_per_unit, delta);
        let entry = self.entries.entry(account.clone()).or_default();
        entry.correction = entry.correction.plus(shift);
    }
}
