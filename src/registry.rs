use thiserror::Error;

use crate::account::{Account, SavingsAccount};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Account number already exists: {0}")]
    DuplicateAccountNumber(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Invalid account selection: {index} (have {len} accounts)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Insertion ordered, append-only collection of accounts with unique
/// account numbers.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    pub fn register(&mut self, account: Account) -> Result<&Account, RegistryError> {
        if self.contains(account.number()) {
            return Err(RegistryError::DuplicateAccountNumber(
                account.number().to_string(),
            ));
        }
        self.accounts.push(account);
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    pub fn contains(&self, number: &str) -> bool {
        self.accounts.iter().any(|acc| acc.number() == number)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn find_by_index(&self, index: usize) -> Result<&Account, RegistryError> {
        let len = self.accounts.len();
        self.accounts
            .get(index)
            .ok_or(RegistryError::IndexOutOfRange { index, len })
    }

    pub fn find_by_number(&self, number: &str) -> Result<&Account, RegistryError> {
        self.accounts
            .iter()
            .find(|acc| acc.number() == number)
            .ok_or_else(|| RegistryError::AccountNotFound(number.to_string()))
    }

    pub fn find_by_number_mut(&mut self, number: &str) -> Result<&mut Account, RegistryError> {
        self.accounts
            .iter_mut()
            .find(|acc| acc.number() == number)
            .ok_or_else(|| RegistryError::AccountNotFound(number.to_string()))
    }

    pub fn savings_mut(&mut self) -> impl Iterator<Item = SavingsAccount<'_>> {
        self.accounts.iter_mut().filter_map(Account::as_savings_mut)
    }
}
