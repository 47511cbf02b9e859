use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountSummary, InterestAccrual, Withdrawal},
    command::CommandError,
    registry::RegistryError,
    transaction::Transaction,
};

pub mod in_memory_bank;

#[derive(Debug, Error)]
pub enum BankError {
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error(transparent)]
    RegistryErr(#[from] RegistryError),
    #[error("Account {0} is not a savings account!")]
    NotSavings(String),
}

impl BankError {
    /// Malformed input, as opposed to a policy violation or a failed lookup.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            BankError::CommandErr(_)
                | BankError::AccountErr(
                    AccountError::NonPositiveAmount { .. } | AccountError::AmountTooLarge { .. }
                )
        )
    }
}

/// One row of [`Bank::list_accounts`]. `index` is zero based and can be fed
/// back to [`Bank::find_by_index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountListing {
    pub index: usize,
    pub number: String,
    pub holder: String,
}

/// Operations available to a front end. Accounts are addressed by their
/// account number.
pub trait Bank {
    /// `variant` selects the account kind (`1`/`savings` or `2`/`checking`),
    /// `variant_param` is the interest rate or the overdraft limit.
    fn create_account(
        &mut self,
        number: &str,
        holder: &str,
        initial_balance: Decimal,
        variant: &str,
        variant_param: Decimal,
    ) -> Result<&Account, BankError>;

    fn deposit(&mut self, number: &str, amount: Decimal) -> Result<Decimal, BankError>;

    fn withdraw(&mut self, number: &str, amount: Decimal) -> Result<Withdrawal, BankError>;

    /// Fails with [`BankError::NotSavings`] for a checking account.
    fn add_interest(&mut self, number: &str) -> Result<InterestAccrual, BankError>;

    /// Accrues interest on every savings account, in registration order.
    /// One account failing does not stop the others.
    fn add_interest_to_savings(&mut self) -> Vec<(String, Result<InterestAccrual, BankError>)>;

    fn list_accounts(&self) -> Vec<AccountListing>;

    fn find_by_index(&self, index: usize) -> Result<&Account, BankError>;

    fn find_by_number(&self, number: &str) -> Result<&Account, BankError>;

    fn describe(&self, number: &str) -> Result<AccountSummary, BankError>;

    fn history(&self, number: &str) -> Result<&[Transaction], BankError>;
}
