//! Operation models for CSV replay.

use crate::account::AccountId;
use crate::units::TokenAmount;
use serde::Deserialize;
use std::str::FromStr;

/// Raw operation record as read from CSV.
///
/// Columns are `op,caller,from,to,amount`. Which of `from`, `to` and
/// `amount` are required depends on the operation.
#[derive(Debug, Deserialize)]
pub struct OperationRecord {
    /// Operation name: mint, burn, transfer, approve, transfer_from, dividend, withdraw
    pub op: String,

    /// Identity making the call
    pub caller: String,

    /// Owner for transfer_from
    pub from: Option<String>,

    /// Recipient, spender or payout destination
    pub to: Option<String>,

    /// Token amount in decimal form
    pub amount: Option<String>,
}

impl OperationRecord {
    /// Parses the raw CSV record into a typed operation.
    ///
    /// Returns a description of the problem if the record is unusable.
    pub fn parse(&self) -> Result<ParsedOperation, String> {
        let caller = required_account(Some(&self.caller), "caller")?;
        let op = self.op.trim().to_lowercase();

        let kind = match op.as_str() {
            "mint" => OpKind::Mint(self.parse_amount()?),
            "burn" => OpKind::Burn {
                destination: required_account(self.to.as_ref(), "to")?,
            },
            "transfer" => OpKind::Transfer {
                to: required_account(self.to.as_ref(), "to")?,
                amount: self.parse_amount()?,
            },
            "approve" => OpKind::Approve {
                spender: required_account(self.to.as_ref(), "to")?,
                amount: self.parse_amount()?,
            },
            "transfer_from" | "transferfrom" => OpKind::TransferFrom {
                owner: required_account(self.from.as_ref(), "from")?,
                to: required_account(self.to.as_ref(), "to")?,
                amount: self.parse_amount()?,
            },
            "dividend" | "record_dividend" => OpKind::Dividend(self.parse_amount()?),
            "withdraw" | "withdraw_dividend" => OpKind::Withdraw {
                destination: required_account(self.to.as_ref(), "to")?,
            },
            other => return Err(format!("unknown operation '{}'", other)),
        };

        Ok(ParsedOperation { caller, kind })
    }

    /// Parses the amount field into a `TokenAmount`.
    fn parse_amount(&self) -> Result<TokenAmount, String> {
        let raw = self
            .amount
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "missing amount".to_string())?;
        TokenAmount::from_str(raw).map_err(|e| format!("bad amount '{}': {}", raw, e))
    }
}

fn required_account(field: Option<&String>, column: &str) -> Result<AccountId, String> {
    field
        .map(AccountId::new)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| format!("missing '{}'", column))
}

/// A parsed and validated operation ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOperation {
    /// Identity making the call
    pub caller: AccountId,

    /// Operation with its arguments
    pub kind: OpKind,
}

impl ParsedOperation {
    /// Base units deposited with the call. Only mint and dividend carry value.
    pub fn attached_value(&self) -> u128 {
        match self.kind {
            OpKind::Mint(amount) | OpKind::Dividend(amount) => amount.base_units(),
            _ => 0,
        }
    }
}

/// Operation variants with their arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpKind {
    /// Deposit value and receive the same amount of tokens.
    Mint(TokenAmount),

    /// Redeem the whole balance, paying the value to `destination`.
    Burn { destination: AccountId },

    /// Move tokens from the caller.
    Transfer { to: AccountId, amount: TokenAmount },

    /// Set a spending limit for `spender` over the caller's tokens.
    Approve {
        spender: AccountId,
        amount: TokenAmount,
    },

    /// Move tokens out of `owner`'s balance using the caller's allowance.
    TransferFrom {
        owner: AccountId,
        to: AccountId,
        amount: TokenAmount,
    },

    /// Inject value to be split among current holders.
    Dividend(TokenAmount),

    /// Pay the caller's withdrawable dividend to `destination`.
    Withdraw { destination: AccountId },
}
