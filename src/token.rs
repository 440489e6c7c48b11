//! The dividend-paying token.
//!
//! Ties the ledger, the allowance registry and the dividend accumulator
//! together behind the public operation surface. Each operation either
//! completes or leaves every piece of state as it found it. Operations
//! that pay value out finish all internal bookkeeping before asking the
//! host to release anything.

use crate::account::{AccountId, AccountStatement};
use crate::allowance::AllowanceRegistry;
use crate::dividend::DividendAccumulator;
use crate::error::{LedgerError, Result};
use crate::host::TransactionContext;
use crate::ledger::Ledger;
use crate::units::TokenAmount;
use crate::{DECIMALS, NAME, SYMBOL};
use log::{debug, warn};
use primitive_types::U256;

/// A 1:1 backed token that distributes injected value to its holders.
///
/// # Invariants
///
/// - `total_supply == sum(balances)`
/// - `reserve == total_supply + recorded dividends - withdrawn dividends`
/// - `withdrawable_dividend(a) + withdrawn_dividend(a) == accumulative_dividend(a)`
#[derive(Debug, Default)]
pub struct DividendToken {
    ledger: Ledger,
    allowances: AllowanceRegistry,
    dividends: DividendAccumulator,

    /// Value held on behalf of holders: principal plus unpaid dividends.
    reserve: u128,
}

impl DividendToken {
    /// Creates a token with no supply.
    pub fn new() -> Self {
        DividendToken::default()
    }

    pub fn name(&self) -> &'static str {
        NAME
    }

    pub fn symbol(&self) -> &'static str {
        SYMBOL
    }

    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    pub fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.ledger.balance_of(account)
    }

    /// Value the token currently holds.
    pub fn reserve(&self) -> u128 {
        self.reserve
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.allowances.allowance(owner, spender)
    }

    /// Scaled cumulative dividend per token unit.
    pub fn magnified_dividend_per_unit(&self) -> U256 {
        self.dividends.magnified_per_unit()
    }

    pub fn withdrawable_dividend(&self, account: &AccountId) -> u128 {
        self.dividends
            .withdrawable(account, self.ledger.balance_of(account))
    }

    pub fn accumulative_dividend(&self, account: &AccountId) -> u128 {
        self.dividends
            .accumulative(account, self.ledger.balance_of(account))
    }

    pub fn withdrawn_dividend(&self, account: &AccountId) -> u128 {
        self.dividends.entry(account).withdrawn
    }

    /// Mints the value attached to the call to the caller, 1:1.
    pub fn mint<C: TransactionContext>(&mut self, ctx: &mut C) -> Result<u128> {
        let amount = ctx.attached_value();
        let reserve = self
            .reserve
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("reserve"))?;

        self.ledger.mint(&mut self.dividends, ctx.caller(), amount)?;
        self.reserve = reserve;

        debug!("Minted {} to {}", amount, ctx.caller());
        Ok(amount)
    }

    /// Burns the caller's entire balance and releases the same value to
    /// `destination`. Returns the amount burnt.
    pub fn burn<C: TransactionContext>(
        &mut self,
        ctx: &mut C,
        destination: &AccountId,
    ) -> Result<u128> {
        ensure_no_value(ctx)?;
        let caller = ctx.caller().clone();

        let amount = self.ledger.burn_all(&mut self.dividends, &caller)?;
        self.reserve -= amount;

        if let Err(source) = ctx.release(destination, amount) {
            self.reserve += amount;
            self.ledger.restore_burnt(&mut self.dividends, &caller, amount);
            warn!("Burn by {} rolled back: {}", caller, source);
            return Err(LedgerError::ReleaseFailed {
                destination: destination.clone(),
                source,
            });
        }

        debug!("Burnt {} from {}, released to {}", amount, caller, destination);
        Ok(amount)
    }

    /// Moves `amount` from the caller to `to`.
    pub fn transfer<C: TransactionContext>(
        &mut self,
        ctx: &mut C,
        to: &AccountId,
        amount: u128,
    ) -> Result<()> {
        ensure_no_value(ctx)?;
        self.ledger
            .transfer(&mut self.dividends, ctx.caller(), to, amount)?;

        debug!("Transferred {} from {} to {}", amount, ctx.caller(), to);
        Ok(())
    }

    /// Sets how much `spender` may move out of the caller's balance.
    pub fn approve<C: TransactionContext>(
        &mut self,
        ctx: &mut C,
        spender: &AccountId,
        amount: u128,
    ) -> Result<()> {
        ensure_no_value(ctx)?;
        self.allowances.approve(ctx.caller(), spender, amount);

        debug!("{} approved {} for {}", ctx.caller(), spender, amount);
        Ok(())
    }

    /// Moves `amount` from `owner` to `to` against the caller's allowance.
    pub fn transfer_from<C: TransactionContext>(
        &mut self,
        ctx: &mut C,
        owner: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<()> {
        ensure_no_value(ctx)?;
        let spender = ctx.caller();

        self.allowances.ensure_allowance(owner, spender, amount)?;
        self.ledger.ensure_balance(owner, amount)?;

        self.allowances.consume(owner, spender, amount)?;
        self.ledger.transfer(&mut self.dividends, owner, to, amount)?;

        debug!("{} moved {} from {} to {}", spender, amount, owner, to);
        Ok(())
    }

    /// Distributes the value attached to the call over current holders.
    pub fn record_dividend<C: TransactionContext>(&mut self, ctx: &mut C) -> Result<()> {
        let amount = ctx.attached_value();
        let reserve = self
            .reserve
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("reserve"))?;

        self.dividends.record(amount, self.ledger.total_supply())?;
        self.reserve = reserve;

        debug!("{} recorded a dividend of {}", ctx.caller(), amount);
        Ok(())
    }

    /// Pays the caller's withdrawable dividend to `destination`.
    ///
    /// Nothing to withdraw is not an error; the call returns zero.
    pub fn withdraw_dividend<C: TransactionContext>(
        &mut self,
        ctx: &mut C,
        destination: &AccountId,
    ) -> Result<u128> {
        ensure_no_value(ctx)?;
        let caller = ctx.caller().clone();
        let balance = self.ledger.balance_of(&caller);

        let amount = self.dividends.claim(&caller, balance);
        if amount == 0 {
            debug!("{} has no dividend to withdraw", caller);
            return Ok(0);
        }
        self.reserve -= amount;

        if let Err(source) = ctx.release(destination, amount) {
            self.reserve += amount;
            self.dividends.unclaim(&caller, amount);
            warn!("Dividend withdrawal by {} rolled back: {}", caller, source);
            return Err(LedgerError::ReleaseFailed {
                destination: destination.clone(),
                source,
            });
        }

        debug!("Withdrew dividend {} for {} to {}", amount, caller, destination);
        Ok(amount)
    }

    /// Statement for one account. `received` is left at zero; only the host
    /// knows what left the token.
    pub fn statement(&self, account: &AccountId) -> AccountStatement {
        AccountStatement {
            account: account.clone(),
            balance: TokenAmount::from(self.balance_of(account)),
            withdrawable: TokenAmount::from(self.withdrawable_dividend(account)),
            withdrawn: TokenAmount::from(self.withdrawn_dividend(account)),
            received: TokenAmount::ZERO,
        }
    }

    /// Every account that has held a balance at some point.
    pub fn holders(&self) -> impl Iterator<Item = &AccountId> {
        self.ledger.accounts()
    }

    /// Verifies the supply and reserve invariants.
    pub fn check_invariant(&self) -> bool {
        let outstanding: u128 = self
            .holders()
            .map(|a| self.withdrawable_dividend(a))
            .sum();
        let backed = self
            .total_supply()
            .checked_add(outstanding)
            .map_or(false, |needed| self.reserve >= needed);
        self.ledger.check_invariant() && backed
    }
}

fn ensure_no_value<C: TransactionContext>(ctx: &C) -> Result<()> {
    match ctx.attached_value() {
        0 => Ok(()),
        value => Err(LedgerError::UnexpectedValue(value)),
    }
}
