//! # Dividend Ledger
//!
//! A fungible token backed 1:1 by deposited value, with delegated spending
//! and proportional dividends that holders can withdraw at any time, even
//! after giving up their tokens.
//!
//! ## Design Principles
//!
//! - **Constant-time dividends**: a magnified per-unit accumulator plus
//!   per-account corrections; no operation iterates over holders
//! - **All-or-nothing operations**: a rejected call changes nothing
//! - **State before payout**: value is released only after bookkeeping is final
//! - **Strict invariants**: `total_supply == sum(balances)` always maintained
//!
//! ## Example
//!
//! ```
//! use dividend_ledger::{AccountId, DividendToken, Wallets};
//!
//! let mut token = DividendToken::new();
//! let mut wallets = Wallets::new();
//!
//! token.mint(&mut wallets.call("alice", 75)).unwrap();
//! token.mint(&mut wallets.call("bob", 25)).unwrap();
//! token.record_dividend(&mut wallets.call("payer", 1000)).unwrap();
//!
//! let bob = AccountId::from("bob");
//! assert_eq!(token.withdrawable_dividend(&bob), 250);
//!
//! token.withdraw_dividend(&mut wallets.call("bob", 0), &bob).unwrap();
//! assert_eq!(wallets.received(&bob), 250);
//! ```

pub mod account;
pub mod allowance;
pub mod dividend;
pub mod engine;
pub mod error;
pub mod host;
pub mod ledger;
pub mod magnified;
pub mod operation;
pub mod token;
pub mod units;

pub use account::{AccountId, AccountStatement};
pub use allowance::AllowanceRegistry;
pub use dividend::{DividendAccumulator, DividendEntry};
pub use engine::ReplayEngine;
pub use error::{LedgerError, Result};
pub use host::{Call, HostError, TransactionContext, Wallets};
pub use ledger::{BalanceHook, Ledger};
pub use magnified::{Correction, MAGNITUDE};
pub use operation::{OpKind, OperationRecord, ParsedOperation};
pub use token::DividendToken;
pub use units::{AmountParseError, TokenAmount};

/// Display name of the token.
pub const NAME: &str = "Test token";

/// Ticker symbol of the token.
pub const SYMBOL: &str = "TEST";

/// Fractional digits of one token.
pub const DECIMALS: u8 = 18;
