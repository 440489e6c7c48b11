//! CSV replay of token operations.
//!
//! Applies operations in the order they are read against a single
//! [`DividendToken`], with [`Wallets`] standing in for the host. Rejected
//! operations are logged and skipped; they never leave partial state.

use crate::account::{AccountId, AccountStatement};
use crate::error::{LedgerError, Result};
use crate::host::Wallets;
use crate::operation::{OpKind, OperationRecord, ParsedOperation};
use crate::token::DividendToken;
use crate::units::TokenAmount;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::collections::BTreeSet;
use std::io::{Read, Write};

/// Replays operations against a token and reports final account states.
///
/// # Output Ordering
///
/// Statements are written sorted by account identity so output is
/// reproducible.
#[derive(Debug, Default)]
pub struct ReplayEngine {
    token: DividendToken,
    wallets: Wallets,
}

impl ReplayEngine {
    /// Creates an engine around a fresh token.
    pub fn new() -> Self {
        ReplayEngine::default()
    }

    pub fn token(&self) -> &DividendToken {
        &self.token
    }

    pub fn wallets(&self) -> &Wallets {
        &self.wallets
    }

    /// Processes operations from a CSV reader in streaming fashion.
    ///
    /// Unparseable rows and rejected operations are logged at warn level and
    /// skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<OperationRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let outcome = result
                .map_err(LedgerError::from)
                .and_then(|record| {
                    record
                        .parse()
                        .map_err(|message| LedgerError::InvalidRecord {
                            row: row_num,
                            message,
                        })
                })
                .and_then(|op| self.apply(op, row_num));

            if let Err(e) = outcome {
                warn!("Row {}: {}", row_num, e);
            }
        }

        Ok(())
    }

    /// Applies a single parsed operation as its own call.
    pub fn apply(&mut self, op: ParsedOperation, row: usize) -> Result<()> {
        let value = op.attached_value();
        let mut call = self.wallets.call(&op.caller, value);

        match op.kind {
            OpKind::Mint(_) => {
                self.token.mint(&mut call)?;
            }
            OpKind::Burn { destination } => {
                self.token.burn(&mut call, &destination)?;
            }
            OpKind::Transfer { to, amount } => {
                self.token.transfer(&mut call, &to, amount.base_units())?;
            }
            OpKind::Approve { spender, amount } => {
                self.token.approve(&mut call, &spender, amount.base_units())?;
            }
            OpKind::TransferFrom { owner, to, amount } => {
                self.token
                    .transfer_from(&mut call, &owner, &to, amount.base_units())?;
            }
            OpKind::Dividend(_) => {
                self.token.record_dividend(&mut call)?;
            }
            OpKind::Withdraw { destination } => {
                self.token.withdraw_dividend(&mut call, &destination)?;
            }
        }

        debug!("Row {}: applied operation for {}", row, op.caller);
        Ok(())
    }

    /// Statements for every holder and every payout destination, sorted.
    pub fn statements(&self) -> Vec<AccountStatement> {
        let accounts: BTreeSet<&AccountId> = self
            .token
            .holders()
            .chain(self.wallets.recipients())
            .collect();

        accounts
            .into_iter()
            .map(|account| AccountStatement {
                received: TokenAmount::from(self.wallets.received(account)),
                ..self.token.statement(account)
            })
            .collect()
    }

    /// Writes final account states to CSV.
    ///
    /// Columns are `account,balance,withdrawable,withdrawn,received`, every
    /// amount with 18 decimal places.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for statement in self.statements() {
            csv_writer.serialize(statement)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
