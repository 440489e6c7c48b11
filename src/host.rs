//! The host execution environment, seen from the ledger.
//!
//! The host supplies who is calling, how much value came attached to the
//! call, and a primitive for releasing value to a destination. `Wallets` is
//! an in-memory host used by the replay engine and the tests.

use crate::account::AccountId;
use log::debug;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Failures reported by the host when releasing value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The destination refused the payment.
    #[error("destination {0} rejected the payment")]
    Rejected(AccountId),

    /// The destination balance would overflow.
    #[error("destination {0} cannot hold any more value")]
    Overflow(AccountId),
}

/// One call into the ledger, as provided by the host.
pub trait TransactionContext {
    /// Identity of the account making the call.
    fn caller(&self) -> &AccountId;

    /// Value deposited with the call, in base units.
    fn attached_value(&self) -> u128;

    /// Sends `amount` base units held by the ledger to `destination`.
    ///
    /// Control may pass to the destination; the ledger only calls this after
    /// its own state is final for the operation.
    fn release(&mut self, destination: &AccountId, amount: u128) -> Result<(), HostError>;
}

/// In-memory host that records every value release.
#[derive(Debug, Default)]
pub struct Wallets {
    /// Total value released to each destination.
    received: HashMap<AccountId, u128>,

    /// Destinations whose payments fail.
    rejecting: HashSet<AccountId>,
}

impl Wallets {
    /// Creates a host with no recorded payments.
    pub fn new() -> Self {
        Wallets::default()
    }

    /// Starts a call from `caller` carrying `value` base units.
    pub fn call(&mut self, caller: impl Into<AccountId>, value: u128) -> Call<'_> {
        Call {
            caller: caller.into(),
            value,
            wallets: self,
        }
    }

    /// Makes every future release to `destination` fail.
    pub fn reject_payments_to(&mut self, destination: impl Into<AccountId>) {
        self.rejecting.insert(destination.into());
    }

    /// Total value released to `destination` so far.
    pub fn received(&self, destination: &AccountId) -> u128 {
        self.received.get(destination).copied().unwrap_or(0)
    }

    /// Every identity that has received value.
    pub fn recipients(&self) -> impl Iterator<Item = &AccountId> {
        self.received.keys()
    }

    fn credit(&mut self, destination: &AccountId, amount: u128) -> Result<(), HostError> {
        if self.rejecting.contains(destination) {
            return Err(HostError::Rejected(destination.clone()));
        }

        let entry = self.received.entry(destination.clone()).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| HostError::Overflow(destination.clone()))?;
        debug!("Released {} to {}", amount, destination);
        Ok(())
    }
}

/// A single call executing against [`Wallets`].
#[derive(Debug)]
pub struct Call<'a> {
    caller: AccountId,
    value: u128,
    wallets: &'a mut Wallets,
}

impl TransactionContext for Call<'_> {
    fn caller(&self) -> &AccountId {
        &self.caller
    }

    fn attached_value(&self) -> u128 {
        self.value
    }

    fn release(&mut self, destination: &AccountId, amount: u128) -> Result<(), HostError> {
        self.wallets.credit(destination, amount)
    }
}
