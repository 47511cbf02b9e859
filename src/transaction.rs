use std::{borrow::Borrow, fmt};

use chrono::{DateTime, Local};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rounds to exactly two decimal places, midpoints away from zero.
/// Every amount shown to the user goes through here.
pub fn round_cents<D>(value: D) -> Decimal
where
    D: Borrow<Decimal>,
{
    let mut cents = value
        .borrow()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    InitialDeposit,
    Deposit,
    Withdrawal,
    Interest,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::InitialDeposit => "INITIAL_DEPOSIT",
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
            TransactionKind::Interest => "INTEREST",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One balance-affecting event, recorded once and never changed.
///
/// `amount` is always the magnitude of the change, the direction comes
/// from `kind`.
#[derive(Debug, Clone)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Decimal,
    balance_after: Decimal,
    timestamp: DateTime<Local>,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Decimal, balance_after: Decimal) -> Self {
        Self {
            kind,
            amount,
            balance_after,
            timestamp: Local::now(),
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn balance_after(&self) -> Decimal {
        self.balance_after
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Withdrawal => -self.amount,
            TransactionKind::InitialDeposit
            | TransactionKind::Deposit
            | TransactionKind::Interest => self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: ${} | Balance: ${}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.kind,
            round_cents(self.amount),
            round_cents(self.balance_after)
        )
    }
}
