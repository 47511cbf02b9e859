use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::transaction::{Transaction, TransactionKind, round_cents};

/// Lowest balance a savings account can be brought down to by a withdrawal.
pub const MINIMUM_SAVINGS_BALANCE: Decimal = Decimal::from_parts(10000, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    Deposit,
    Withdraw,
    AddInterest,
}

impl fmt::Display for AccountAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountAction::Deposit => f.write_str("Deposit"),
            AccountAction::Withdraw => f.write_str("Withdrawal"),
            AccountAction::AddInterest => f.write_str("Interest"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsTerms {
    interest_rate: Decimal,
    minimum_balance: Decimal,
}

impl SavingsTerms {
    pub fn new(interest_rate: Decimal) -> Self {
        Self {
            interest_rate,
            minimum_balance: MINIMUM_SAVINGS_BALANCE,
        }
    }

    /// Percentage applied on every interest accrual.
    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn minimum_balance(&self) -> Decimal {
        self.minimum_balance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckingTerms {
    pub overdraft_limit: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Savings(SavingsTerms),
    Checking(CheckingTerms),
}

impl AccountKind {
    pub fn name(&self) -> &'static str {
        match self {
            AccountKind::Savings(_) => "Savings",
            AccountKind::Checking(_) => "Checking",
        }
    }
}

/// Outcome of a validated operation, carrying the balance it was checked
/// against the current state to produce.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct AccountEvent {
    kind: TransactionKind,
    amount: Decimal,
    balance_after: Decimal,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("{action} amount must be positive!")]
    NonPositiveAmount { action: AccountAction },
    #[error("{action} amount is too large!")]
    AmountTooLarge { action: AccountAction },
    #[error("Insufficient funds! Current balance: ${}", round_cents(.balance))]
    InsufficientFunds { balance: Decimal },
    #[error(
        "Cannot withdraw! Minimum balance of ${} must be maintained.",
        round_cents(.minimum_balance)
    )]
    BelowMinimumBalance { minimum_balance: Decimal },
    #[error(
        "Withdrawal denied! Maximum available: ${} (including overdraft)",
        round_cents(.available)
    )]
    ExceedsOverdraft { available: Decimal },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    pub amount: Decimal,
    pub new_balance: Decimal,
    /// Set when the balance went below zero. The withdrawal still succeeded.
    pub overdrawn: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterestAccrual {
    pub interest: Decimal,
    pub new_balance: Decimal,
}

/// Read-only snapshot of an account, see [`Account::describe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub number: String,
    pub holder: String,
    pub balance: Decimal,
    pub kind: AccountKind,
}

#[derive(Debug)]
pub struct Account {
    number: String,
    holder: String,
    balance: Decimal,
    kind: AccountKind,
    history: Vec<Transaction>,
}

impl Account {
    /// Inputs are expected to be validated already, see
    /// [`crate::command::OpenAccountCommand`].
    pub(crate) fn new(
        number: String,
        holder: String,
        initial_balance: Decimal,
        kind: AccountKind,
    ) -> Self {
        let mut history = Vec::new();
        if initial_balance > Decimal::ZERO {
            history.push(Transaction::new(
                TransactionKind::InitialDeposit,
                initial_balance,
                initial_balance,
            ));
        }
        Self {
            number,
            holder,
            balance: initial_balance,
            kind,
            history,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn is_savings(&self) -> bool {
        matches!(self.kind, AccountKind::Savings(_))
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    pub fn describe(&self) -> AccountSummary {
        AccountSummary {
            number: self.number.clone(),
            holder: self.holder.clone(),
            balance: self.balance,
            kind: self.kind,
        }
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        let event = self.handle_deposit(amount)?;
        self.apply(event);
        debug!(account = %self.number, %amount, balance = %self.balance, "deposit accepted");
        Ok(self.balance)
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<Withdrawal, AccountError> {
        let event = self.handle_withdraw(amount)?;
        self.apply(event);
        let overdrawn = self.balance < Decimal::ZERO;
        if overdrawn {
            warn!(account = %self.number, balance = %self.balance, "account overdrawn");
        } else {
            debug!(account = %self.number, %amount, balance = %self.balance, "withdrawal accepted");
        }
        Ok(Withdrawal {
            amount,
            new_balance: self.balance,
            overdrawn,
        })
    }

    /// Interest accrual is only reachable through this handle, so it can't
    /// be requested for a checking account.
    pub fn as_savings_mut(&mut self) -> Option<SavingsAccount<'_>> {
        match self.kind {
            AccountKind::Savings(terms) => Some(SavingsAccount {
                account: self,
                terms,
            }),
            AccountKind::Checking(_) => None,
        }
    }

    pub(crate) fn handle_deposit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        let action = AccountAction::Deposit;
        ensure_positive(amount, action)?;
        let balance_after = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::AmountTooLarge { action })?;
        Ok(AccountEvent {
            kind: TransactionKind::Deposit,
            amount,
            balance_after,
        })
    }

    pub(crate) fn handle_withdraw(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        let action = AccountAction::Withdraw;
        ensure_positive(amount, action)?;
        let balance_after = self.balance.checked_sub(amount);
        match &self.kind {
            AccountKind::Savings(terms) => {
                // an underflowing result is far below any floor
                if balance_after.is_none_or(|balance| balance < terms.minimum_balance) {
                    return Err(AccountError::BelowMinimumBalance {
                        minimum_balance: terms.minimum_balance,
                    });
                }
                self.handle_base_withdraw(amount)
            }
            AccountKind::Checking(terms) => {
                // an overflowing ceiling is above any representable amount
                let available = self
                    .balance
                    .checked_add(terms.overdraft_limit)
                    .unwrap_or(Decimal::MAX);
                if amount > available {
                    return Err(AccountError::ExceedsOverdraft { available });
                }
                Ok(AccountEvent {
                    kind: TransactionKind::Withdrawal,
                    amount,
                    balance_after: balance_after.ok_or(AccountError::AmountTooLarge { action })?,
                })
            }
        }
    }

    fn handle_base_withdraw(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                balance: self.balance,
            });
        }
        Ok(AccountEvent {
            kind: TransactionKind::Withdrawal,
            amount,
            balance_after: self.balance - amount,
        })
    }

    fn handle_interest(&self, terms: &SavingsTerms) -> Result<AccountEvent, AccountError> {
        let too_large = AccountError::AmountTooLarge {
            action: AccountAction::AddInterest,
        };
        let interest = self
            .balance
            .checked_mul(terms.interest_rate / Decimal::ONE_HUNDRED)
            .ok_or(too_large.clone())?;
        let balance_after = self.balance.checked_add(interest).ok_or(too_large)?;
        Ok(AccountEvent {
            kind: TransactionKind::Interest,
            amount: interest,
            balance_after,
        })
    }

    fn apply(&mut self, event: AccountEvent) {
        self.balance = event.balance_after;
        self.history
            .push(Transaction::new(event.kind, event.amount, self.balance));
    }
}

fn ensure_positive(amount: Decimal, action: AccountAction) -> Result<(), AccountError> {
    if amount <= Decimal::ZERO {
        return Err(AccountError::NonPositiveAmount { action });
    }
    Ok(())
}

/// Mutable view of an account known to be a savings account.
pub struct SavingsAccount<'a> {
    account: &'a mut Account,
    terms: SavingsTerms,
}

impl SavingsAccount<'_> {
    pub fn number(&self) -> &str {
        self.account.number()
    }

    pub fn add_interest(&mut self) -> Result<InterestAccrual, AccountError> {
        let event = self.account.handle_interest(&self.terms)?;
        let interest = event.amount;
        self.account.apply(event);
        info!(
            account = %self.account.number,
            %interest,
            balance = %self.account.balance,
            "interest added"
        );
        Ok(InterestAccrual {
            interest,
            new_balance: self.account.balance,
        })
    }
}
