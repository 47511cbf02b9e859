use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::{Account, AccountKind, CheckingTerms, SavingsTerms};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountVariant {
    Savings,
    Checking,
}

impl FromStr for AccountVariant {
    type Err = CommandError;

    /// Accepts the menu number as well as the variant name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "savings" => Ok(AccountVariant::Savings),
            "2" | "checking" => Ok(AccountVariant::Checking),
            other => Err(CommandError::UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Account number must not be empty!")]
    EmptyAccountNumber,
    #[error("Initial balance cannot be negative!")]
    NegativeInitialBalance,
    #[error("Invalid account type `{0}`!")]
    UnknownVariant(String),
    #[error("Interest rate cannot be negative!")]
    NegativeInterestRate,
    #[error("Overdraft limit cannot be negative!")]
    NegativeOverdraftLimit,
}

/// Validated request to open an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAccountCommand {
    number: String,
    holder: String,
    initial_balance: Decimal,
    kind: AccountKind,
}

impl OpenAccountCommand {
    /// `variant_param` is the interest rate for savings accounts and the
    /// overdraft limit for checking accounts.
    pub fn parse(
        number: &str,
        holder: &str,
        initial_balance: Decimal,
        variant: &str,
        variant_param: Decimal,
    ) -> Result<Self, CommandError> {
        let number = number.trim();
        if number.is_empty() {
            return Err(CommandError::EmptyAccountNumber);
        }
        if initial_balance < Decimal::ZERO {
            return Err(CommandError::NegativeInitialBalance);
        }
        let kind = Self::parse_kind(variant.parse()?, variant_param)?;
        Ok(Self {
            number: number.to_string(),
            holder: holder.trim().to_string(),
            initial_balance,
            kind,
        })
    }

    fn parse_kind(variant: AccountVariant, param: Decimal) -> Result<AccountKind, CommandError> {
        match variant {
            AccountVariant::Savings => {
                if param < Decimal::ZERO {
                    return Err(CommandError::NegativeInterestRate);
                }
                Ok(AccountKind::Savings(SavingsTerms::new(param)))
            }
            AccountVariant::Checking => {
                if param < Decimal::ZERO {
                    return Err(CommandError::NegativeOverdraftLimit);
                }
                Ok(AccountKind::Checking(CheckingTerms {
                    overdraft_limit: param,
                }))
            }
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn initial_balance(&self) -> Decimal {
        self.initial_balance
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub(crate) fn into_account(self) -> Account {
        Account::new(self.number, self.holder, self.initial_balance, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::account::MINIMUM_SAVINGS_BALANCE;

    use super::*;

    #[test]
    fn parse_variant() {
        assert_eq!("1".parse::<AccountVariant>(), Ok(AccountVariant::Savings));
        assert_eq!(" Savings ".parse::<AccountVariant>(), Ok(AccountVariant::Savings));
        assert_eq!("2".parse::<AccountVariant>(), Ok(AccountVariant::Checking));
        assert_eq!("CHECKING".parse::<AccountVariant>(), Ok(AccountVariant::Checking));
        let err = "3".parse::<AccountVariant>().unwrap_err();
        assert_eq!(err, CommandError::UnknownVariant("3".to_string()));
        assert_eq!(err.to_string(), "Invalid account type `3`!");
    }

    #[test]
    fn parse_savings_command() {
        let cmd = OpenAccountCommand::parse(" S1 ", "Alice", dec!(500), "1", dec!(5)).unwrap();
        assert_eq!(cmd.number(), "S1");
        assert_eq!(cmd.holder(), "Alice");
        assert_eq!(cmd.initial_balance(), dec!(500));
        assert_eq!(cmd.kind(), &AccountKind::Savings(SavingsTerms::new(dec!(5))));
        let AccountKind::Savings(terms) = cmd.kind() else {
            panic!("expected savings terms");
        };
        assert_eq!(terms.minimum_balance(), MINIMUM_SAVINGS_BALANCE);
        let acc = cmd.into_account();
        assert_eq!(acc.balance(), dec!(500));
        assert!(acc.is_savings());
    }

    #[test]
    fn parse_checking_command() {
        let cmd = OpenAccountCommand::parse("C1", "Bob", dec!(0), "checking", dec!(50)).unwrap();
        assert_eq!(
            cmd.kind(),
            &AccountKind::Checking(CheckingTerms {
                overdraft_limit: dec!(50)
            })
        );
        assert!(cmd.into_account().history().is_empty());
    }

    #[test]
    fn reject_invalid_input() {
        let err = OpenAccountCommand::parse("  ", "Bob", dec!(0), "1", dec!(1)).unwrap_err();
        assert_eq!(err, CommandError::EmptyAccountNumber);

        let err = OpenAccountCommand::parse("C1", "Bob", dec!(-1), "2", dec!(1)).unwrap_err();
        assert_eq!(err, CommandError::NegativeInitialBalance);

        let err = OpenAccountCommand::parse("C1", "Bob", dec!(1), "loan", dec!(1)).unwrap_err();
        assert_eq!(err, CommandError::UnknownVariant("loan".to_string()));

        let err = OpenAccountCommand::parse("S1", "Bob", dec!(1), "1", dec!(-2)).unwrap_err();
        assert_eq!(err, CommandError::NegativeInterestRate);

        let err = OpenAccountCommand::parse("C1", "Bob", dec!(1), "2", dec!(-2)).unwrap_err();
        assert_eq!(err, CommandError::NegativeOverdraftLimit);
    }
}
