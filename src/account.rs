//! Account identity and per-account statements.
//!
//! Accounts are implicit: every numeric field of an account reads as zero
//! until the account is first touched, and nothing is ever deleted.

use crate::units::TokenAmount;
use serde::Serialize;
use std::fmt;

/// Identity of a holder, spender or payout destination.
///
/// Identities are opaque strings supplied by the host environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an identity from anything string-like. Surrounding whitespace is dropped.
    pub fn new(id: impl AsRef<str>) -> Self {
        AccountId(id.as_ref().trim().to_string())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identity is blank.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        AccountId::new(id)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        AccountId::new(id)
    }
}

impl From<&AccountId> for AccountId {
    fn from(id: &AccountId) -> Self {
        id.clone()
    }
}

/// Point-in-time view of one account, as written by the replay engine.
///
/// # Invariants
///
/// - `withdrawn` never decreases between two statements of the same account
/// - `withdrawable + withdrawn` is the account's lifetime dividend entitlement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountStatement {
    /// Account identity.
    pub account: AccountId,

    /// Tokens currently held.
    pub balance: TokenAmount,

    /// Dividend entitlement not yet withdrawn.
    pub withdrawable: TokenAmount,

    /// Dividends already paid out to this account.
    pub withdrawn: TokenAmount,

    /// Value the host released to this identity as a destination
    /// (burn redemptions and dividend withdrawals).
    pub received: TokenAmount,
}
